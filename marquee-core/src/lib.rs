//! Marquee Core - Shared building blocks
//!
//! Configuration, the domain records exchanged with the movie catalog and
//! the trend store, and the tracing setup used by every binary.

pub mod config;
pub mod tracing_setup;
pub mod types;

// Re-export main types for convenient access
pub use config::{CatalogConfig, MarqueeConfig, SearchConfig, ServerConfig, TrendStoreConfig};
pub use types::{CatalogPage, Movie, NOT_AVAILABLE, TrendRecord};

/// Core errors that can bubble up from startup and wiring code.
#[derive(Debug, thiserror::Error)]
pub enum MarqueeError {
    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Web UI error: {reason}")]
    WebUI { reason: String },
}

impl MarqueeError {
    /// Message printed to the terminal when startup fails.
    pub fn user_message(&self) -> String {
        match self {
            MarqueeError::Configuration { reason } => format!("Configuration problem: {reason}"),
            MarqueeError::Io(_) => "File system error occurred".to_string(),
            MarqueeError::WebUI { reason } => format!("Web interface error: {reason}"),
        }
    }

    /// Wraps any displayable web server failure.
    pub fn from_web_ui_error(error: impl std::fmt::Display) -> Self {
        MarqueeError::WebUI {
            reason: error.to_string(),
        }
    }
}
