//! HTMX fragment handlers

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::Html;
use serde::Deserialize;

use crate::components::{results_section, trending_section};
use crate::errors::WebError;
use crate::server::AppState;
use crate::session::Session;

/// Form data posted by the search input
#[derive(Debug, Deserialize)]
pub struct QueryForm {
    /// Raw text of the search box
    #[serde(default)]
    pub query: String,
}

/// Accepts one keystroke's worth of search text.
///
/// # Errors
/// - `WebError::SessionNotFound` - No live session cookie
/// - `WebError::SearchUnavailable` - The session's orchestrator has stopped
pub async fn set_query_fragment(
    Session(search): Session,
    Form(form): Form<QueryForm>,
) -> Result<StatusCode, WebError> {
    search.set_query(form.query).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Renders the trending section.
pub async fn trending_fragment(Session(search): Session) -> Html<String> {
    Html(trending_section(&search.state().trending))
}

/// Renders the results section.
pub async fn results_fragment(
    State(state): State<AppState>,
    Session(search): Session,
) -> Html<String> {
    let ui = search.state();
    Html(results_section(&ui.status, &state.image_base_url))
}
