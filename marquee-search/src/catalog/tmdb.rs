//! Movie lookup using the TMDB REST API.

use async_trait::async_trait;
use marquee_core::{CatalogConfig, CatalogPage, Movie};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Deserialize;

use super::{CatalogEndpoint, MovieCatalog};
use crate::errors::CatalogError;

/// TMDB-compatible catalog client.
///
/// Sends one GET per call with a bearer token and a JSON accept header.
/// No retries and no timeout beyond the transport defaults.
#[derive(Debug, Clone)]
pub struct TmdbCatalog {
    client: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
}

/// Response body of the search and discover endpoints.
///
/// Besides TMDB's own failure shape (`success: false`) the OMDb-style
/// `Response`/`Error` pair is honoured, so either flavour of proxy works.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogResponse {
    /// Movies on this page
    #[serde(default)]
    pub results: Option<Vec<Movie>>,
    /// TMDB failure flag
    #[serde(default)]
    pub success: Option<bool>,
    /// TMDB failure message
    #[serde(default)]
    pub status_message: Option<String>,
    /// OMDb-style status, `"False"` on failure
    #[serde(rename = "Response", default)]
    pub response: Option<String>,
    /// OMDb-style failure message
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

impl CatalogResponse {
    /// Returns the failure message if the body flags an API-level failure.
    ///
    /// The outer `Option` says whether the body failed, the inner one
    /// whether it carried a message.
    pub fn api_failure(&self) -> Option<Option<String>> {
        let omdb_failed = self
            .response
            .as_deref()
            .is_some_and(|r| r.eq_ignore_ascii_case("false"));
        let tmdb_failed = self.success == Some(false);

        if omdb_failed || tmdb_failed {
            Some(self.error.clone().or_else(|| self.status_message.clone()))
        } else {
            None
        }
    }
}

impl TmdbCatalog {
    /// Creates a catalog client from injected configuration.
    pub fn new(config: &CatalogConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Creates a catalog client that shares an existing HTTP client.
    pub fn with_client(client: reqwest::Client, config: &CatalogConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
        }
    }

    async fn request(&self, endpoint: &CatalogEndpoint) -> Result<CatalogPage, CatalogError> {
        let url = endpoint.url(&self.base_url);
        tracing::debug!(%url, "Requesting catalog page");

        let token = self.api_token.as_deref().unwrap_or_default();
        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .send()
            .await
            .map_err(|e| CatalogError::Network {
                reason: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
            });
        }

        let body: CatalogResponse = response.json().await.map_err(|e| CatalogError::Parse {
            reason: format!("JSON parsing failed: {e}"),
        })?;

        if let Some(message) = body.api_failure() {
            return Err(CatalogError::Api { message });
        }

        let results = body.results.unwrap_or_default();
        tracing::debug!(%url, count = results.len(), "Catalog page received");

        Ok(CatalogPage {
            results,
            status: status.as_u16(),
        })
    }
}

#[async_trait]
impl MovieCatalog for TmdbCatalog {
    async fn search(&self, query: &str) -> Result<CatalogPage, CatalogError> {
        self.request(&CatalogEndpoint::Search(query.to_string()))
            .await
    }

    async fn discover(&self) -> Result<CatalogPage, CatalogError> {
        self.request(&CatalogEndpoint::Discover).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> CatalogResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_success_body_has_no_failure() {
        let body = parse(r#"{"page": 1, "results": [{"id": 1, "title": "Batman"}]}"#);
        assert_eq!(body.api_failure(), None);
        assert_eq!(body.results.unwrap().len(), 1);
    }

    #[test]
    fn test_omdb_style_failure() {
        let body = parse(r#"{"Response": "False", "Error": "Movie not found!"}"#);
        assert_eq!(
            body.api_failure(),
            Some(Some("Movie not found!".to_string()))
        );

        let body = parse(r#"{"Response": "false"}"#);
        assert_eq!(body.api_failure(), Some(None));
    }

    #[test]
    fn test_tmdb_style_failure() {
        let body = parse(
            r#"{"success": false, "status_code": 7, "status_message": "Invalid API key"}"#,
        );
        assert_eq!(body.api_failure(), Some(Some("Invalid API key".to_string())));
    }

    #[test]
    fn test_missing_results_is_not_a_failure() {
        let body = parse(r#"{"page": 1}"#);
        assert_eq!(body.api_failure(), None);
        assert!(body.results.is_none());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let catalog = TmdbCatalog::new(&CatalogConfig {
            base_url: "http://localhost/3/".to_string(),
            ..Default::default()
        });
        assert_eq!(catalog.base_url, "http://localhost/3");
    }
}
