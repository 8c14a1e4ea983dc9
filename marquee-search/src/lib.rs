//! Marquee Search - Movie lookup and debounced search orchestration

#![deny(missing_docs)]
#![deny(clippy::missing_errors_doc)]
//!
//! Wraps the remote movie catalog and the trending search store behind
//! traits, and drives both from a single actor that turns keystrokes into
//! debounced catalog requests.

pub mod catalog;
pub mod debounce;
pub mod errors;
pub mod orchestrator;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
pub mod trends;

// Re-export main types
pub use catalog::{CatalogEndpoint, DemoCatalog, MovieCatalog, TmdbCatalog};
pub use debounce::Debouncer;
pub use errors::{CatalogError, SearchError, TrendStoreError};
pub use orchestrator::{
    FetchStatus, SearchCommand, SearchHandle, UiState, spawn_search_orchestrator,
};
pub use trends::{AppwriteTrendStore, InMemoryTrendStore, TrendStore, normalize_search_term};
