//! Centralized configuration for Marquee.
//!
//! All tunable parameters and remote endpoints are defined here so that
//! business logic receives them by injection instead of reading the
//! environment itself.

use std::time::Duration;

use url::Url;

use crate::MarqueeError;

/// Central configuration for all Marquee components.
///
/// Groups related configuration settings into logical sections.
/// Supports environment variable overrides for runtime customization.
#[derive(Debug, Clone, Default)]
pub struct MarqueeConfig {
    pub catalog: CatalogConfig,
    pub trend_store: TrendStoreConfig,
    pub search: SearchConfig,
    pub server: ServerConfig,
}

/// Movie catalog API configuration.
///
/// The bearer token is optional. A missing token is not
/// validated and simply makes every catalog request fail authorization.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog REST API, without trailing slash
    pub base_url: String,
    /// Bearer token sent in the `Authorization` header
    pub api_token: Option<String>,
    /// Prefix joined with a movie's poster path to build an image URL
    pub image_base_url: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.themoviedb.org/3".to_string(),
            api_token: None,
            image_base_url: "https://image.tmdb.org/t/p/w500".to_string(),
        }
    }
}

/// Hosted record store configuration for trending searches.
#[derive(Debug, Clone)]
pub struct TrendStoreConfig {
    /// REST endpoint of the hosted backend, e.g. `https://cloud.appwrite.io/v1`
    pub endpoint: String,
    /// Project identifier sent with every request
    pub project_id: Option<String>,
    /// Database holding the metrics collection
    pub database_id: Option<String>,
    /// Collection holding one document per search term
    pub collection_id: Option<String>,
    /// Server API key, if the collection is not publicly writable
    pub api_key: Option<String>,
    /// Number of records returned by a trending query
    pub trending_limit: usize,
}

impl Default for TrendStoreConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://cloud.appwrite.io/v1".to_string(),
            project_id: None,
            database_id: None,
            collection_id: None,
            api_key: None,
            trending_limit: 5,
        }
    }
}

impl TrendStoreConfig {
    /// Returns true when every identifier needed to address the collection is set.
    pub fn is_configured(&self) -> bool {
        self.project_id.is_some() && self.database_id.is_some() && self.collection_id.is_some()
    }
}

/// Search input behaviour.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before a search is issued
    pub debounce: Duration,
    /// Capacity of the orchestrator command channel
    pub command_buffer: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
            command_buffer: 100,
        }
    }
}

/// Web server binding and polling settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// How often the browser polls rendered fragments
    pub poll_interval: Duration,
    /// Directory served under `/static`
    pub static_dir: String,
    /// Browser sessions unseen for this long are ended
    pub session_idle_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            poll_interval: Duration::from_millis(500),
            static_dir: "marquee-web/static".to_string(),
            session_idle_timeout: Duration::from_secs(30 * 60),
        }
    }
}

impl MarqueeConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Allows runtime configuration via environment variables while
    /// maintaining sensible defaults. Malformed numeric values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// `from_env` delegates here; tests pass a map instead of mutating the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        // Catalog overrides
        if let Some(token) = lookup("MARQUEE_TMDB_API_KEY") {
            config.catalog.api_token = Some(token);
        }
        if let Some(base_url) = lookup("MARQUEE_TMDB_BASE_URL") {
            config.catalog.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(image_base) = lookup("MARQUEE_TMDB_IMAGE_BASE_URL") {
            config.catalog.image_base_url = image_base.trim_end_matches('/').to_string();
        }

        // Trend store overrides
        if let Some(endpoint) = lookup("MARQUEE_APPWRITE_ENDPOINT") {
            config.trend_store.endpoint = endpoint.trim_end_matches('/').to_string();
        }
        config.trend_store.project_id = lookup("MARQUEE_APPWRITE_PROJECT_ID");
        config.trend_store.database_id = lookup("MARQUEE_APPWRITE_DATABASE_ID");
        config.trend_store.collection_id = lookup("MARQUEE_APPWRITE_COLLECTION_ID");
        config.trend_store.api_key = lookup("MARQUEE_APPWRITE_API_KEY");
        if let Some(limit) = lookup("MARQUEE_TRENDING_LIMIT") {
            if let Ok(limit) = limit.parse::<usize>() {
                config.trend_store.trending_limit = limit;
            }
        }

        // Search overrides
        if let Some(debounce) = lookup("MARQUEE_DEBOUNCE_MS") {
            if let Ok(millis) = debounce.parse::<u64>() {
                config.search.debounce = Duration::from_millis(millis);
            }
        }

        // Server overrides
        if let Some(idle) = lookup("MARQUEE_SESSION_IDLE_SECS") {
            if let Ok(secs) = idle.parse::<u64>() {
                config.server.session_idle_timeout = Duration::from_secs(secs);
            }
        }

        config
    }

    /// Creates a configuration for tests: local endpoints and a short debounce.
    pub fn for_testing() -> Self {
        Self {
            catalog: CatalogConfig {
                base_url: "http://127.0.0.1:9/3".to_string(),
                api_token: Some("test-token".to_string()),
                ..Default::default()
            },
            search: SearchConfig {
                debounce: Duration::from_millis(500),
                command_buffer: 16,
            },
            ..Default::default()
        }
    }

    /// Checks that configured URLs parse.
    ///
    /// Tokens and identifiers are not checked.
    ///
    /// # Errors
    ///
    /// - `MarqueeError::Configuration` - A base URL or endpoint is not a valid absolute URL
    pub fn validate(&self) -> Result<(), MarqueeError> {
        for (name, value) in [
            ("catalog base URL", &self.catalog.base_url),
            ("catalog image base URL", &self.catalog.image_base_url),
            ("trend store endpoint", &self.trend_store.endpoint),
        ] {
            Url::parse(value).map_err(|e| MarqueeError::Configuration {
                reason: format!("invalid {name} '{value}': {e}"),
            })?;
        }

        if self.trend_store.trending_limit == 0 {
            return Err(MarqueeError::Configuration {
                reason: "trending limit must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config_values() {
        let config = MarqueeConfig::default();

        assert_eq!(config.catalog.base_url, "https://api.themoviedb.org/3");
        assert!(config.catalog.api_token.is_none());
        assert_eq!(config.search.debounce, Duration::from_millis(500));
        assert_eq!(config.trend_store.trending_limit, 5);
        assert!(!config.trend_store.is_configured());
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_lookup_overrides() {
        let config = MarqueeConfig::from_lookup(lookup_from(&[
            ("MARQUEE_TMDB_API_KEY", "secret"),
            ("MARQUEE_TMDB_BASE_URL", "http://localhost:8080/3/"),
            ("MARQUEE_APPWRITE_PROJECT_ID", "proj"),
            ("MARQUEE_APPWRITE_DATABASE_ID", "db"),
            ("MARQUEE_APPWRITE_COLLECTION_ID", "metrics"),
            ("MARQUEE_TRENDING_LIMIT", "3"),
            ("MARQUEE_DEBOUNCE_MS", "250"),
            ("MARQUEE_SESSION_IDLE_SECS", "60"),
        ]));

        assert_eq!(config.catalog.api_token.as_deref(), Some("secret"));
        assert_eq!(config.catalog.base_url, "http://localhost:8080/3");
        assert!(config.trend_store.is_configured());
        assert_eq!(config.trend_store.trending_limit, 3);
        assert_eq!(config.search.debounce, Duration::from_millis(250));
        assert_eq!(config.server.session_idle_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_malformed_numbers_keep_defaults() {
        let config = MarqueeConfig::from_lookup(lookup_from(&[
            ("MARQUEE_TRENDING_LIMIT", "many"),
            ("MARQUEE_DEBOUNCE_MS", "-1"),
        ]));

        assert_eq!(config.trend_store.trending_limit, 5);
        assert_eq!(config.search.debounce, Duration::from_millis(500));
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        let mut config = MarqueeConfig::default();
        assert!(config.validate().is_ok());

        config.catalog.base_url = "not a url".to_string();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, MarqueeError::Configuration { .. }));
        assert!(err.to_string().contains("catalog base URL"));
    }

    #[test]
    fn test_validate_rejects_zero_trending_limit() {
        let mut config = MarqueeConfig::default();
        config.trend_store.trending_limit = 0;
        assert!(config.validate().is_err());
    }
}
