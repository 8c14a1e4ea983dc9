//! JSON API handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use marquee_core::TrendRecord;
use marquee_search::UiState;
use serde::Deserialize;
use serde_json::json;

use crate::errors::WebError;
use crate::server::AppState;
use crate::session::{Session, session_cookie, session_id};

/// Body of `POST /api/query`
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    /// Raw search text
    pub query: String,
}

/// Opens a session for clients that never load the home page.
///
/// Replies with the session cookie and `{"session": id}`.
pub async fn api_open_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let (id, _) = state.sessions.open(session_id(&headers));

    (
        StatusCode::CREATED,
        [(header::SET_COOKIE, session_cookie(id))],
        Json(json!({ "session": id })),
    )
}

/// Returns the full search state of the caller's session.
pub async fn api_state(Session(search): Session) -> Json<UiState> {
    Json(search.state())
}

/// Returns the trending records loaded when the session opened.
pub async fn api_trending(Session(search): Session) -> Json<Vec<TrendRecord>> {
    Json(search.state().trending)
}

/// Replaces the raw query, exactly like typing into the search box.
///
/// # Errors
/// - `WebError::SessionNotFound` - No live session cookie
/// - `WebError::BadRequest` - Body is not `{"query": "..."}`
/// - `WebError::SearchUnavailable` - The session's orchestrator has stopped
pub async fn api_set_query(
    Session(search): Session,
    body: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<StatusCode, WebError> {
    let Json(request) = body.map_err(|e| WebError::BadRequest {
        reason: e.body_text(),
    })?;

    search.set_query(request.query).await?;
    Ok(StatusCode::ACCEPTED)
}
