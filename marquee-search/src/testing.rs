//! Scripted catalog and trend store doubles for tests.
//!
//! Both record every call so tests can assert on what the orchestrator
//! actually requested.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use marquee_core::{CatalogPage, Movie, TrendRecord};
use parking_lot::Mutex;

use crate::catalog::{CatalogEndpoint, MovieCatalog};
use crate::errors::{CatalogError, TrendStoreError};
use crate::trends::{InMemoryTrendStore, TrendStore};

#[derive(Debug, Clone)]
struct ScriptedResponse {
    outcome: Result<Vec<Movie>, CatalogError>,
    delay: Duration,
}

#[derive(Debug, Default)]
struct CatalogScript {
    responses: HashMap<CatalogEndpoint, ScriptedResponse>,
    calls: Vec<CatalogEndpoint>,
}

/// Catalog answering from a script keyed by endpoint.
///
/// Unscripted endpoints answer with an empty page. Clones share the script
/// and the call log.
#[derive(Debug, Clone, Default)]
pub struct ScriptedCatalog {
    script: Arc<Mutex<CatalogScript>>,
}

impl ScriptedCatalog {
    /// Creates a catalog with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `endpoint` immediately with `outcome`.
    pub fn respond(
        self,
        endpoint: CatalogEndpoint,
        outcome: Result<Vec<Movie>, CatalogError>,
    ) -> Self {
        self.respond_after(endpoint, Duration::ZERO, outcome)
    }

    /// Answers `endpoint` with `outcome` after `delay`.
    pub fn respond_after(
        self,
        endpoint: CatalogEndpoint,
        delay: Duration,
        outcome: Result<Vec<Movie>, CatalogError>,
    ) -> Self {
        self.script
            .lock()
            .responses
            .insert(endpoint, ScriptedResponse { outcome, delay });
        self
    }

    /// Every endpoint requested so far, in request order.
    pub fn calls(&self) -> Vec<CatalogEndpoint> {
        self.script.lock().calls.clone()
    }

    async fn answer(&self, endpoint: CatalogEndpoint) -> Result<CatalogPage, CatalogError> {
        let response = {
            let mut script = self.script.lock();
            script.calls.push(endpoint.clone());
            script.responses.get(&endpoint).cloned()
        };

        let Some(response) = response else {
            return Ok(CatalogPage {
                results: Vec::new(),
                status: 200,
            });
        };

        if !response.delay.is_zero() {
            tokio::time::sleep(response.delay).await;
        }

        response.outcome.map(|results| CatalogPage {
            results,
            status: 200,
        })
    }
}

#[async_trait]
impl MovieCatalog for ScriptedCatalog {
    async fn search(&self, query: &str) -> Result<CatalogPage, CatalogError> {
        self.answer(CatalogEndpoint::Search(query.to_string())).await
    }

    async fn discover(&self) -> Result<CatalogPage, CatalogError> {
        self.answer(CatalogEndpoint::Discover).await
    }
}

/// Trend store that logs updates and can be told to fail.
///
/// Successful updates are applied to an inner [`InMemoryTrendStore`].
#[derive(Debug, Clone)]
pub struct RecordingTrendStore {
    inner: InMemoryTrendStore,
    updates: Arc<Mutex<Vec<(String, u64)>>>,
    fail_reads: bool,
    fail_writes: bool,
}

impl RecordingTrendStore {
    /// Creates a working store with a trending limit of 5.
    pub fn new() -> Self {
        Self {
            inner: InMemoryTrendStore::new("https://image.tmdb.org/t/p/w500", 5),
            updates: Arc::new(Mutex::new(Vec::new())),
            fail_reads: false,
            fail_writes: false,
        }
    }

    /// Makes `get_trending_movies` fail.
    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Makes `update_search_count` fail after logging the call.
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Seeds the store with searches before the orchestrator starts.
    pub async fn seed(&self, query: &str, movie: &Movie, times: usize) {
        for _ in 0..times {
            let _ = self.inner.update_search_count(query, movie).await;
        }
    }

    /// `(query, movie id)` of every update call, in call order.
    pub fn updates(&self) -> Vec<(String, u64)> {
        self.updates.lock().clone()
    }
}

impl Default for RecordingTrendStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TrendStore for RecordingTrendStore {
    async fn update_search_count(&self, query: &str, movie: &Movie) -> Result<(), TrendStoreError> {
        self.updates.lock().push((query.to_string(), movie.id));

        if self.fail_writes {
            return Err(TrendStoreError::Network {
                reason: "scripted write failure".to_string(),
            });
        }
        self.inner.update_search_count(query, movie).await
    }

    async fn get_trending_movies(&self) -> Result<Vec<TrendRecord>, TrendStoreError> {
        if self.fail_reads {
            return Err(TrendStoreError::Status {
                status: 503,
                body: "scripted read failure".to_string(),
            });
        }
        self.inner.get_trending_movies().await
    }
}
