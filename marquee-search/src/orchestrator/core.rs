//! Search orchestrator state machine, run inside the actor.

use std::sync::Arc;

use marquee_core::{Movie, TrendRecord};
use tokio::sync::{mpsc, watch};

use super::commands::SearchEvent;
use super::state::{FetchStatus, UiState};
use crate::catalog::{CatalogEndpoint, MovieCatalog};
use crate::debounce::Debouncer;
use crate::errors::{CatalogError, TrendStoreError};
use crate::trends::TrendStore;

/// Owns the UI state and sequences catalog and trend store calls.
///
/// Only the actor loop calls into this type, one message at a time, so the
/// state needs no locking. Network calls run on spawned tasks and report
/// back through `events`.
pub(crate) struct SearchOrchestrator {
    state: UiState,
    publisher: watch::Sender<UiState>,
    debouncer: Debouncer<String>,
    catalog: Arc<dyn MovieCatalog>,
    trends: Arc<dyn TrendStore>,
    events: mpsc::UnboundedSender<SearchEvent>,
    /// Generation of the most recently started fetch
    generation: u64,
}

impl SearchOrchestrator {
    pub(crate) fn new(
        publisher: watch::Sender<UiState>,
        debouncer: Debouncer<String>,
        catalog: Arc<dyn MovieCatalog>,
        trends: Arc<dyn TrendStore>,
        events: mpsc::UnboundedSender<SearchEvent>,
    ) -> Self {
        Self {
            state: UiState::default(),
            publisher,
            debouncer,
            catalog,
            trends,
            events,
            generation: 0,
        }
    }

    /// Startup work: fetch for the initial empty query and load trending.
    pub(crate) fn mount(&mut self) {
        let query = self.state.debounced_query.clone();
        self.start_fetch(query);
        self.load_trending_movies();
    }

    /// Replaces the raw query and restarts the debounce timer.
    pub(crate) fn set_query(&mut self, query: String) {
        tracing::trace!(%query, "Raw query changed");
        self.state.raw_query = query.clone();
        self.debouncer.push(query);
        self.publish();
    }

    /// Applies a query whose quiet period has elapsed.
    ///
    /// A fetch starts only if the debounced value actually changed.
    pub(crate) fn apply_debounced(&mut self, query: String) {
        if query == self.state.debounced_query {
            tracing::trace!(%query, "Debounced query unchanged");
            return;
        }

        self.state.debounced_query = query.clone();
        self.start_fetch(query);
    }

    pub(crate) fn handle_event(&mut self, event: SearchEvent) {
        match event {
            SearchEvent::FetchSettled {
                generation,
                query,
                outcome,
            } => self.settle_fetch(generation, &query, outcome),
            SearchEvent::TrendingLoaded { result } => self.apply_trending(result),
        }
    }

    pub(crate) fn cancel_pending_input(&mut self) {
        if self.debouncer.is_pending() {
            tracing::debug!(raw_query = %self.state.raw_query, "Dropping pending query");
        }
        self.debouncer.cancel();
    }

    fn start_fetch(&mut self, query: String) {
        self.generation += 1;
        let generation = self.generation;

        tracing::debug!(%query, generation, "Fetching movies");
        self.state.status = FetchStatus::Loading;
        self.publish();

        let catalog = Arc::clone(&self.catalog);
        let trends = Arc::clone(&self.trends);
        let events = self.events.clone();

        tokio::spawn(async move {
            let fetch_query = query.clone();
            // A panic inside the fetch still settles it.
            let outcome = tokio::spawn(async move {
                fetch_movies(catalog.as_ref(), trends, &fetch_query).await
            })
            .await
            .unwrap_or_else(|e| {
                Err(CatalogError::Network {
                    reason: format!("fetch task failed: {e}"),
                })
            });

            let _ = events.send(SearchEvent::FetchSettled {
                generation,
                query,
                outcome,
            });
        });
    }

    fn settle_fetch(
        &mut self,
        generation: u64,
        query: &str,
        outcome: Result<Vec<Movie>, CatalogError>,
    ) {
        if generation != self.generation {
            tracing::debug!(
                %query,
                generation,
                current = self.generation,
                "Discarding stale fetch result"
            );
            return;
        }

        self.state.status = match outcome {
            Ok(movies) => {
                tracing::debug!(%query, count = movies.len(), "Movies loaded");
                FetchStatus::Loaded(movies)
            }
            Err(e) => FetchStatus::Failed(e.user_message()),
        };
        self.publish();
    }

    fn load_trending_movies(&self) {
        let trends = Arc::clone(&self.trends);
        let events = self.events.clone();

        tokio::spawn(async move {
            let result = trends.get_trending_movies().await;
            let _ = events.send(SearchEvent::TrendingLoaded { result });
        });
    }

    fn apply_trending(&mut self, result: Result<Vec<TrendRecord>, TrendStoreError>) {
        match result {
            Ok(records) => {
                tracing::debug!(count = records.len(), "Trending movies loaded");
                self.state.trending = records;
                self.publish();
            }
            Err(e) => tracing::error!("Error fetching trending movies: {e}"),
        }
    }

    fn publish(&self) {
        self.publisher.send_replace(self.state.clone());
    }
}

/// Fetches one catalog page for `query`.
///
/// On success with a non-empty query and at least one result, the trend
/// store is told about the first result on a detached task.
async fn fetch_movies(
    catalog: &dyn MovieCatalog,
    trends: Arc<dyn TrendStore>,
    query: &str,
) -> Result<Vec<Movie>, CatalogError> {
    let endpoint = CatalogEndpoint::for_query(query);

    let page = match catalog.fetch(&endpoint).await {
        Ok(page) => page,
        Err(e @ CatalogError::Api { .. }) => {
            tracing::warn!(%query, "Catalog rejected request: {e}");
            return Err(e);
        }
        Err(e) => {
            tracing::error!(%query, "Error fetching movies: {e}");
            return Err(e);
        }
    };

    if !query.is_empty() {
        if let Some(first) = page.results.first() {
            spawn_trend_update(trends, query.to_string(), first.clone());
        }
    }

    Ok(page.results)
}

/// Records the search without waiting for the store.
fn spawn_trend_update(trends: Arc<dyn TrendStore>, query: String, movie: Movie) {
    tokio::spawn(async move {
        if let Err(e) = trends.update_search_count(&query, &movie).await {
            tracing::warn!(%query, "Failed to update search count: {e}");
        }
    });
}
