//! HTTP request handlers organized by functionality

pub mod api;
pub mod htmx;

// Re-export handler functions
pub use api::{QueryRequest, api_open_session, api_set_query, api_state, api_trending};
pub use htmx::{QueryForm, results_fragment, set_query_fragment, trending_fragment};
