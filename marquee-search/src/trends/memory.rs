//! In-process trend store for demo runs and tests.

use std::sync::Arc;

use async_trait::async_trait;
use marquee_core::{Movie, TrendRecord};
use parking_lot::RwLock;

use super::{TrendStore, normalize_search_term, record_poster_url};
use crate::errors::TrendStoreError;

/// Trend store kept in memory.
///
/// Records are kept in insertion order, which is also the tie-break order
/// for equal counts. Clones share the same records.
#[derive(Debug, Clone)]
pub struct InMemoryTrendStore {
    records: Arc<RwLock<Vec<TrendRecord>>>,
    image_base_url: String,
    limit: usize,
}

impl InMemoryTrendStore {
    /// Creates an empty store returning at most `limit` trending records.
    pub fn new(image_base_url: impl Into<String>, limit: usize) -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
            image_base_url: image_base_url.into(),
            limit,
        }
    }

    /// Snapshot of every record in insertion order.
    pub fn records(&self) -> Vec<TrendRecord> {
        self.records.read().clone()
    }

    /// Current count for a search term, if it has been recorded.
    pub fn count_for(&self, query: &str) -> Option<u64> {
        let key = normalize_search_term(query);
        self.records
            .read()
            .iter()
            .find(|record| record.search_term == key)
            .map(|record| record.count)
    }
}

#[async_trait]
impl TrendStore for InMemoryTrendStore {
    async fn update_search_count(&self, query: &str, movie: &Movie) -> Result<(), TrendStoreError> {
        let key = normalize_search_term(query);
        let mut records = self.records.write();

        if let Some(record) = records.iter_mut().find(|record| record.search_term == key) {
            record.count += 1;
            tracing::debug!(search_term = %key, count = record.count, "Incremented search count");
            return Ok(());
        }

        records.push(TrendRecord {
            id: uuid::Uuid::new_v4().to_string(),
            search_term: key.clone(),
            count: 1,
            movie_id: movie.id,
            poster_url: record_poster_url(movie, &self.image_base_url),
        });
        tracing::debug!(search_term = %key, "Created search count record");

        Ok(())
    }

    async fn get_trending_movies(&self) -> Result<Vec<TrendRecord>, TrendStoreError> {
        let mut records = self.records();
        // Stable sort keeps insertion order among equal counts.
        records.sort_by(|a, b| b.count.cmp(&a.count));
        records.truncate(self.limit);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn store() -> InMemoryTrendStore {
        InMemoryTrendStore::new("https://img/w500", 5)
    }

    #[tokio::test]
    async fn test_first_search_creates_record() {
        let store = store();
        let movie = Movie::new(268, "Batman").with_poster("/batman.jpg");

        store.update_search_count("Batman", &movie).await.unwrap();

        let records = store.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].search_term, "batman");
        assert_eq!(records[0].count, 1);
        assert_eq!(records[0].movie_id, 268);
        assert_eq!(records[0].poster_url, "https://img/w500/batman.jpg");
    }

    #[tokio::test]
    async fn test_repeated_searches_increment_normalized_key() {
        let store = store();
        let movie = Movie::new(268, "Batman");

        store.update_search_count("batman", &movie).await.unwrap();
        store.update_search_count(" BATMAN", &movie).await.unwrap();
        store.update_search_count("Batman ", &movie).await.unwrap();

        assert_eq!(store.records().len(), 1);
        assert_eq!(store.count_for("batman"), Some(3));
    }

    #[tokio::test]
    async fn test_trending_limit_and_ties() {
        let store = InMemoryTrendStore::new("https://img", 3);
        let movie = Movie::new(1, "Any");

        for term in ["a", "b", "c", "d"] {
            store.update_search_count(term, &movie).await.unwrap();
        }
        store.update_search_count("d", &movie).await.unwrap();

        let trending = store.get_trending_movies().await.unwrap();
        let terms: Vec<_> = trending.iter().map(|r| r.search_term.as_str()).collect();
        assert_eq!(terms, vec!["d", "a", "b"]);
    }

    proptest! {
        #[test]
        fn test_trending_sorted_and_bounded(
            searches in proptest::collection::vec(0usize..12, 0..60),
            limit in 1usize..8,
        ) {
            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let store = InMemoryTrendStore::new("https://img", limit);
            let movie = Movie::new(1, "Any");

            let trending = runtime.block_on(async {
                for term in &searches {
                    store.update_search_count(&format!("term {term}"), &movie).await.unwrap();
                }
                store.get_trending_movies().await.unwrap()
            });

            prop_assert!(trending.len() <= limit);
            prop_assert!(trending.windows(2).all(|w| w[0].count >= w[1].count));
            let total: u64 = store.records().iter().map(|r| r.count).sum();
            prop_assert_eq!(total, searches.len() as u64);
        }
    }
}
