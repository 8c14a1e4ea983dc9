//! Reusable HTML components for the HTMX UI
//!
//! Components are server-rendered HTML fragments that can be used
//! in the full page or as HTMX partial updates.

pub mod layout;
pub mod movie;
pub mod results;
pub mod search;
pub mod trending;

// Re-export main component functions
pub use layout::{escape, hero_header, polling_region};
pub use movie::movie_card;
pub use results::results_section;
pub use search::search_input;
pub use trending::trending_section;
