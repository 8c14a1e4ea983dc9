//! Trending search bookkeeping.
//!
//! Every successful search bumps a counter keyed by the normalized search
//! term; the most-counted terms are shown as "trending".

use async_trait::async_trait;
use marquee_core::{Movie, TrendRecord};

use crate::errors::TrendStoreError;

pub mod appwrite;
pub mod memory;

pub use appwrite::AppwriteTrendStore;
pub use memory::InMemoryTrendStore;

/// Trait for trend stores.
#[async_trait]
pub trait TrendStore: Send + Sync + std::fmt::Debug {
    /// Records one search for `query` whose first result was `movie`.
    ///
    /// Increments the record matching the normalized query, or creates it
    /// with a count of 1. Every call increments.
    ///
    /// # Errors
    /// - `TrendStoreError::Network` - Store unreachable
    /// - `TrendStoreError::Status` - Store rejected the read or write
    /// - `TrendStoreError::Parse` - Unexpected response body
    /// - `TrendStoreError::NotConfigured` - Store identifiers missing
    async fn update_search_count(&self, query: &str, movie: &Movie) -> Result<(), TrendStoreError>;

    /// Returns the most searched records, highest count first.
    ///
    /// At most the store's configured limit is returned.
    ///
    /// # Errors
    /// Same as [`TrendStore::update_search_count`].
    async fn get_trending_movies(&self) -> Result<Vec<TrendRecord>, TrendStoreError>;
}

/// Lookup key for a search term: surrounding whitespace removed, lower-cased.
pub fn normalize_search_term(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Poster URL stored with a new record. Empty when the movie has no poster.
pub fn record_poster_url(movie: &Movie, image_base_url: &str) -> String {
    movie.poster_url(image_base_url).unwrap_or_default()
}
