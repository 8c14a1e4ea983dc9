//! Home page - search box, trending searches and results

use axum::extract::State;
use axum::http::{HeaderMap, header};
use axum::response::IntoResponse;

use crate::components::{
    hero_header, polling_region, results_section, search_input, trending_section,
};
use crate::pages::render_page;
use crate::server::AppState;
use crate::session::{session_cookie, session_id};

/// Renders the home page for a newly opened session.
///
/// Every load mounts a fresh search, so the page starts with an empty box
/// and the default listing loading. The trending and results sections poll
/// their fragment routes until the orchestrator settles.
pub async fn home_page(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let (id, search) = state.sessions.open(session_id(&headers));
    let ui = search.state();

    let content = format!(
        "{}\n{}\n{}",
        hero_header(&search_input(&ui.raw_query)),
        polling_region(
            "trending",
            "/htmx/trending",
            state.poll_interval,
            &trending_section(&ui.trending),
        ),
        polling_region(
            "results",
            "/htmx/results",
            state.poll_interval,
            &results_section(&ui.status, &state.image_base_url),
        ),
    );

    (
        [(header::SET_COOKIE, session_cookie(id))],
        render_page("Find Movies", &content),
    )
}
