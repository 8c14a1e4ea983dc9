//! Per-visitor search sessions
//!
//! Each page load opens a session with its own search orchestrator, so
//! visitors never see each other's query or results. The browser carries
//! the session id in a cookie; fragment and API requests resolve it back
//! to the orchestrator handle.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, header};
use marquee_core::SearchConfig;
use marquee_search::{MovieCatalog, SearchHandle, TrendStore, spawn_search_orchestrator};
use parking_lot::Mutex;
use tokio::time::Instant;
use uuid::Uuid;

use crate::errors::WebError;
use crate::server::AppState;

/// Name of the cookie holding the session id.
pub const SESSION_COOKIE: &str = "marquee_session";

struct SessionEntry {
    search: SearchHandle,
    last_seen: Instant,
}

/// Live sessions and the dependencies new ones are built from.
///
/// Dropping a session's handle stops its orchestrator.
pub struct SessionRegistry {
    search_config: SearchConfig,
    catalog: Arc<dyn MovieCatalog>,
    trends: Arc<dyn TrendStore>,
    idle_timeout: Duration,
    sessions: Mutex<HashMap<Uuid, SessionEntry>>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    pub fn new(
        search_config: SearchConfig,
        catalog: Arc<dyn MovieCatalog>,
        trends: Arc<dyn TrendStore>,
        idle_timeout: Duration,
    ) -> Self {
        Self {
            search_config,
            catalog,
            trends,
            idle_timeout,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Starts a session with a freshly mounted orchestrator.
    ///
    /// `previous` is the session the browser held before this page load;
    /// it is ended. Sessions idle longer than the timeout are ended too.
    pub fn open(&self, previous: Option<Uuid>) -> (Uuid, SearchHandle) {
        let now = Instant::now();
        let id = Uuid::new_v4();
        let search = spawn_search_orchestrator(
            &self.search_config,
            Arc::clone(&self.catalog),
            Arc::clone(&self.trends),
        );

        let mut sessions = self.sessions.lock();
        if let Some(previous) = previous {
            sessions.remove(&previous);
        }
        let before = sessions.len();
        sessions.retain(|_, entry| now.duration_since(entry.last_seen) < self.idle_timeout);
        let expired = before - sessions.len();
        if expired > 0 {
            tracing::debug!(expired, "Ended idle sessions");
        }

        sessions.insert(
            id,
            SessionEntry {
                search: search.clone(),
                last_seen: now,
            },
        );
        tracing::debug!(session = %id, live = sessions.len(), "Session opened");

        (id, search)
    }

    /// Looks up a live session and marks it as seen.
    pub fn get(&self, id: Uuid) -> Option<SearchHandle> {
        let mut sessions = self.sessions.lock();
        let entry = sessions.get_mut(&id)?;
        entry.last_seen = Instant::now();
        Some(entry.search.clone())
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    /// Returns true when no session is live.
    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }
}

impl std::fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("catalog", &self.catalog)
            .field("trends", &self.trends)
            .field("idle_timeout", &self.idle_timeout)
            .field("live", &self.len())
            .finish()
    }
}

/// Reads the session id from the request's cookies.
pub fn session_id(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value).ok())
}

/// `Set-Cookie` value binding the browser to session `id`.
pub fn session_cookie(id: Uuid) -> String {
    format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax")
}

/// Orchestrator handle of the caller's session.
#[derive(Debug, Clone)]
pub struct Session(pub SearchHandle);

impl FromRequestParts<AppState> for Session {
    type Rejection = WebError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        session_id(&parts.headers)
            .and_then(|id| state.sessions.get(id))
            .map(Session)
            .ok_or(WebError::SessionNotFound)
    }
}
