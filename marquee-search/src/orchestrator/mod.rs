//! Debounced search orchestration.
//!
//! The orchestrator runs as an actor: one task owns the [`UiState`] and
//! processes keystrokes, debounced queries and fetch completions in order.
//! Callers interact through a cloneable [`SearchHandle`].

mod actor;
mod commands;
mod core;
mod handle;
mod state;


pub use actor::spawn_search_orchestrator;
pub use commands::SearchCommand;
pub use handle::SearchHandle;
pub use state::{FetchStatus, UiState};
