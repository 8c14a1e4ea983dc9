//! Remote movie catalog access.
//!
//! A catalog answers two questions: which movies match a query, and which
//! movies to show when there is no query at all.

use async_trait::async_trait;
use marquee_core::CatalogPage;

use crate::errors::CatalogError;

pub mod demo;
pub mod tmdb;

pub use demo::DemoCatalog;
pub use tmdb::TmdbCatalog;

/// Catalog endpoint selected for a query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CatalogEndpoint {
    /// Free-text search for a non-empty query
    Search(String),
    /// Default listing used when the query is empty
    Discover,
}

impl CatalogEndpoint {
    /// Picks the endpoint for a query. Only the empty string maps to discover.
    pub fn for_query(query: &str) -> Self {
        if query.is_empty() {
            Self::Discover
        } else {
            Self::Search(query.to_string())
        }
    }

    /// Full request URL below `base_url`, with the query percent-encoded.
    pub fn url(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        match self {
            Self::Search(query) => {
                format!("{base}/search/movie?query={}", urlencoding::encode(query))
            }
            Self::Discover => format!("{base}/discover/movie"),
        }
    }
}

/// Trait for movie catalogs.
///
/// Implementations provide movie lookup through different backends
/// (the TMDB REST API, in-process demo data, scripted test doubles).
#[async_trait]
pub trait MovieCatalog: Send + Sync + std::fmt::Debug {
    /// Searches movies by free-text query.
    ///
    /// # Errors
    /// - `CatalogError::Network` - Request could not be sent
    /// - `CatalogError::Status` - Non-success HTTP status
    /// - `CatalogError::Parse` - Body is not valid catalog JSON
    /// - `CatalogError::Api` - Body flags an API-level failure
    async fn search(&self, query: &str) -> Result<CatalogPage, CatalogError>;

    /// Lists the catalog's default selection.
    ///
    /// # Errors
    /// Same as [`MovieCatalog::search`].
    async fn discover(&self) -> Result<CatalogPage, CatalogError>;

    /// Dispatches to `search` or `discover`.
    ///
    /// # Errors
    /// Same as [`MovieCatalog::search`].
    async fn fetch(&self, endpoint: &CatalogEndpoint) -> Result<CatalogPage, CatalogError> {
        match endpoint {
            CatalogEndpoint::Search(query) => self.search(query).await,
            CatalogEndpoint::Discover => self.discover().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_empty_query_uses_discover() {
        assert_eq!(CatalogEndpoint::for_query(""), CatalogEndpoint::Discover);
        assert_eq!(
            CatalogEndpoint::Discover.url("https://api.example/3"),
            "https://api.example/3/discover/movie"
        );
    }

    #[test]
    fn test_whitespace_query_still_searches() {
        assert_eq!(
            CatalogEndpoint::for_query(" ").url("https://api.example/3/"),
            "https://api.example/3/search/movie?query=%20"
        );
    }

    #[test]
    fn test_search_url_escapes_query() {
        let url = CatalogEndpoint::for_query("fast & furious").url("https://api.example/3");
        assert_eq!(
            url,
            "https://api.example/3/search/movie?query=fast%20%26%20furious"
        );
    }

    proptest! {
        #[test]
        fn test_search_url_round_trips_any_query(query in "\\PC{1,40}") {
            let url = CatalogEndpoint::for_query(&query).url("http://h/3");
            let encoded = url.strip_prefix("http://h/3/search/movie?query=").unwrap();

            prop_assert!(!encoded.contains(['&', '#', '?', ' ', '+']));
            prop_assert_eq!(urlencoding::decode(encoded).unwrap(), query);
        }
    }
}
