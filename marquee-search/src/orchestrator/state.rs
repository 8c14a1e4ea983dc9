//! Observable search state.

use marquee_core::{Movie, TrendRecord};
use serde::Serialize;

/// Outcome of the most recent catalog fetch.
///
/// Loading and failure are separate variants, so a loading state can never
/// carry an error and a failed state never carries movies.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum FetchStatus {
    /// No fetch has been issued yet
    #[default]
    Idle,
    /// A fetch is in flight
    Loading,
    /// The last fetch succeeded
    Loaded(Vec<Movie>),
    /// The last fetch failed with a user-facing message
    Failed(String),
}

/// Everything the view layer renders.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct UiState {
    /// Text as typed, updated on every keystroke
    pub raw_query: String,
    /// Text the last fetch was issued for
    pub debounced_query: String,
    /// Result of the last fetch
    pub status: FetchStatus,
    /// Most searched terms, loaded once at startup
    pub trending: Vec<TrendRecord>,
}

impl UiState {
    /// Returns true while a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self.status, FetchStatus::Loading)
    }

    /// Message of the last failed fetch, empty otherwise.
    pub fn error_message(&self) -> &str {
        match &self.status {
            FetchStatus::Failed(message) => message,
            _ => "",
        }
    }

    /// Movies of the last successful fetch, empty otherwise.
    pub fn movies(&self) -> &[Movie] {
        match &self.status {
            FetchStatus::Loaded(movies) => movies,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_empty() {
        let state = UiState::default();
        assert!(!state.is_loading());
        assert_eq!(state.error_message(), "");
        assert!(state.movies().is_empty());
        assert!(state.trending.is_empty());
    }

    #[test]
    fn test_failed_state_has_no_movies() {
        let state = UiState {
            status: FetchStatus::Failed("boom".to_string()),
            ..Default::default()
        };
        assert!(!state.is_loading());
        assert_eq!(state.error_message(), "boom");
        assert!(state.movies().is_empty());
    }

    #[test]
    fn test_status_serializes_tagged() {
        let loaded =
            serde_json::to_value(FetchStatus::Loaded(vec![Movie::new(1, "Batman")])).unwrap();
        assert_eq!(loaded["state"], "loaded");
        assert_eq!(loaded["value"][0]["title"], "Batman");

        let loading = serde_json::to_value(FetchStatus::Loading).unwrap();
        assert_eq!(loading, serde_json::json!({"state": "loading"}));
    }
}
