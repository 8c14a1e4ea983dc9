//! Marquee Web - HTMX interface and JSON API

#![warn(missing_docs)]
#![warn(clippy::missing_errors_doc)]
//!
//! Server-rendered pages and fragments on top of the search orchestrator.
//! The browser posts every keystroke and polls the rendered sections; all
//! state lives in the orchestrator actor of the visitor's session.

pub mod components;
pub mod errors;
pub mod handlers;
pub mod pages;
pub mod server;
pub mod session;

// Re-export main types
pub use errors::WebError;
pub use server::{AppState, build_router, run_server};
pub use session::{SESSION_COOKIE, Session, SessionRegistry};
