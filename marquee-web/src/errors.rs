//! Errors returned by web handlers.

use axum::Json;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use marquee_search::SearchError;
use serde_json::json;
use thiserror::Error;

/// Handler failures, rendered as a JSON error body.
#[derive(Debug, Error)]
pub enum WebError {
    /// The search orchestrator no longer accepts commands.
    #[error("Search is unavailable: {0}")]
    SearchUnavailable(#[from] SearchError),

    /// The request carries no live session cookie.
    #[error("Session not found, reload the page")]
    SessionNotFound,

    /// The request body could not be used.
    #[error("Bad request: {reason}")]
    BadRequest {
        /// What was wrong with the request
        reason: String,
    },
}

impl WebError {
    /// HTTP status this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            WebError::SearchUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            WebError::SessionNotFound => StatusCode::UNAUTHORIZED,
            WebError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{self}");
        } else {
            tracing::debug!("{self}");
        }

        let mut response = (status, Json(json!({ "error": self.to_string() }))).into_response();
        if matches!(self, WebError::SessionNotFound) {
            // htmx reloads the page, which opens a new session.
            response
                .headers_mut()
                .insert(HeaderName::from_static("hx-refresh"), HeaderValue::from_static("true"));
        }
        response
    }
}
