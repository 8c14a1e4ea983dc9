//! HTMX web server for Marquee
//!
//! Serves the home page, the HTMX fragments it polls, a small JSON API and
//! static assets. Every visitor gets a search orchestrator of their own;
//! handlers reach it through the session cookie.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::{get, post};
use marquee_core::{MarqueeConfig, MarqueeError};
use marquee_search::{MovieCatalog, TrendStore};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    api_open_session, api_set_query, api_state, api_trending, results_fragment,
    set_query_fragment, trending_fragment,
};
use crate::pages::home_page;
use crate::session::SessionRegistry;

/// Shared state handed to every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Live visitor sessions
    pub sessions: Arc<SessionRegistry>,
    /// Prefix joined with poster paths when rendering movie cards
    pub image_base_url: String,
    /// How often the page re-fetches its fragments
    pub poll_interval: Duration,
}

impl AppState {
    /// Builds handler state; sessions search `catalog` and record to `trends`.
    pub fn new(
        config: &MarqueeConfig,
        catalog: Arc<dyn MovieCatalog>,
        trends: Arc<dyn TrendStore>,
    ) -> Self {
        let sessions = SessionRegistry::new(
            config.search.clone(),
            catalog,
            trends,
            config.server.session_idle_timeout,
        );

        Self {
            sessions: Arc::new(sessions),
            image_base_url: config.catalog.image_base_url.clone(),
            poll_interval: config.server.poll_interval,
        }
    }
}

/// Builds the application router.
///
/// Static files are served from `static_dir` under `/static`.
pub fn build_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        // Full page
        .route("/", get(home_page))
        // HTMX fragments
        .route("/htmx/trending", get(trending_fragment))
        .route("/htmx/results", get(results_fragment))
        .route("/htmx/query", post(set_query_fragment))
        // JSON API
        .route("/api/state", get(api_state))
        .route("/api/trending", get(api_trending))
        .route("/api/query", post(api_set_query))
        .route("/api/session", post(api_open_session))
        // Static assets
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds the configured address and serves until the process is stopped.
///
/// # Errors
/// - `MarqueeError::WebUI` - Address could not be bound or the server failed
pub async fn run_server(
    config: &MarqueeConfig,
    catalog: Arc<dyn MovieCatalog>,
    trends: Arc<dyn TrendStore>,
) -> Result<(), MarqueeError> {
    let state = AppState::new(config, catalog, trends);
    let app = build_router(state, &config.server.static_dir);

    let address = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(MarqueeError::from_web_ui_error)?;

    tracing::info!("Marquee running on http://{address}");
    axum::serve(listener, app)
        .await
        .map_err(MarqueeError::from_web_ui_error)
}
