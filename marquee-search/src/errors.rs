//! Error types for catalog, trend store and orchestrator operations.

use thiserror::Error;

/// Errors returned by a movie catalog.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    /// The request never produced an HTTP response.
    #[error("Network error: {reason}")]
    Network {
        /// The reason for the network error
        reason: String,
    },

    /// The catalog answered with a non-success HTTP status.
    #[error("Catalog returned HTTP {status}")]
    Status {
        /// HTTP status code of the response
        status: u16,
    },

    /// The response body was not the JSON we expected.
    #[error("Parse error: {reason}")]
    Parse {
        /// The reason for the parse error
        reason: String,
    },

    /// The catalog answered successfully but flagged a failure in the body.
    #[error("Catalog reported failure: {}", message.as_deref().unwrap_or("no message"))]
    Api {
        /// Message carried by the response body, if any
        message: Option<String>,
    },
}

impl CatalogError {
    /// Message shown to the user when a fetch fails for this reason.
    ///
    /// API-level failures surface the catalog's own message; everything
    /// else collapses into one generic message.
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::Api { message } => message
                .clone()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| API_FAILURE_MESSAGE.to_string()),
            _ => TRANSPORT_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// Shown when the catalog flags a failure without a message.
pub const API_FAILURE_MESSAGE: &str = "Failed to fetch movies";

/// Shown for transport, status and parse failures.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Error fetching movies, Please try again later";

/// Errors returned by a trend store.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TrendStoreError {
    /// The request never produced an HTTP response.
    #[error("Network error: {reason}")]
    Network {
        /// The reason for the network error
        reason: String,
    },

    /// The store answered with a non-success HTTP status.
    #[error("Trend store returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code of the response
        status: u16,
        /// Response body, kept for diagnostics
        body: String,
    },

    /// The response body was not the JSON we expected.
    #[error("Parse error: {reason}")]
    Parse {
        /// The reason for the parse error
        reason: String,
    },

    /// Project, database or collection identifiers are missing.
    #[error("Trend store is not configured: {missing} missing")]
    NotConfigured {
        /// Name of the first missing setting
        missing: &'static str,
    },
}

/// Errors returned by the search orchestrator handle.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SearchError {
    /// The orchestrator actor has stopped and no longer accepts commands.
    #[error("Search orchestrator has shut down")]
    OrchestratorShutdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_user_messages() {
        assert_eq!(
            CatalogError::Status { status: 500 }.user_message(),
            TRANSPORT_FAILURE_MESSAGE
        );
        assert_eq!(
            CatalogError::Parse {
                reason: "eof".to_string()
            }
            .user_message(),
            TRANSPORT_FAILURE_MESSAGE
        );
        assert_eq!(
            CatalogError::Api {
                message: Some("Invalid API key".to_string())
            }
            .user_message(),
            "Invalid API key"
        );
        assert_eq!(
            CatalogError::Api { message: None }.user_message(),
            API_FAILURE_MESSAGE
        );
        assert_eq!(
            CatalogError::Api {
                message: Some(String::new())
            }
            .user_message(),
            API_FAILURE_MESSAGE
        );
    }
}
