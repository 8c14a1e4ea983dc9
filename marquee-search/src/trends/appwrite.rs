//! Trend store backed by an Appwrite databases collection.
//!
//! The collection holds one document per normalized search term with the
//! attributes `searchTerm`, `count`, `movie_id` and `poster_url`.

use async_trait::async_trait;
use marquee_core::{Movie, TrendRecord, TrendStoreConfig};
use serde::Deserialize;
use serde_json::{Value, json};

use super::{TrendStore, normalize_search_term, record_poster_url};
use crate::errors::TrendStoreError;

const PROJECT_HEADER: &str = "X-Appwrite-Project";
const KEY_HEADER: &str = "X-Appwrite-Key";

/// Appwrite REST client for the search metrics collection.
#[derive(Debug, Clone)]
pub struct AppwriteTrendStore {
    client: reqwest::Client,
    endpoint: String,
    project_id: Option<String>,
    database_id: Option<String>,
    collection_id: Option<String>,
    api_key: Option<String>,
    image_base_url: String,
    limit: usize,
}

/// Body of a document list response.
#[derive(Debug, Deserialize)]
struct DocumentList {
    #[serde(default)]
    documents: Vec<TrendRecord>,
}

/// Builds a JSON-encoded Appwrite query.
fn query(method: &str, attribute: Option<&str>, values: Option<Value>) -> String {
    let mut q = json!({ "method": method });
    if let Some(attribute) = attribute {
        q["attribute"] = json!(attribute);
    }
    if let Some(values) = values {
        q["values"] = values;
    }
    q.to_string()
}

impl AppwriteTrendStore {
    /// Creates a store client from injected configuration.
    ///
    /// Missing identifiers are reported on first use, not here.
    pub fn new(config: &TrendStoreConfig, image_base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            project_id: config.project_id.clone(),
            database_id: config.database_id.clone(),
            collection_id: config.collection_id.clone(),
            api_key: config.api_key.clone(),
            image_base_url: image_base_url.into(),
            limit: config.trending_limit,
        }
    }

    fn documents_url(&self) -> Result<String, TrendStoreError> {
        let database = self
            .database_id
            .as_deref()
            .ok_or(TrendStoreError::NotConfigured {
                missing: "database id",
            })?;
        let collection = self
            .collection_id
            .as_deref()
            .ok_or(TrendStoreError::NotConfigured {
                missing: "collection id",
            })?;

        Ok(format!(
            "{}/databases/{database}/collections/{collection}/documents",
            self.endpoint
        ))
    }

    fn authorize(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, TrendStoreError> {
        let project = self
            .project_id
            .as_deref()
            .ok_or(TrendStoreError::NotConfigured {
                missing: "project id",
            })?;

        let request = request.header(PROJECT_HEADER, project);
        Ok(match self.api_key.as_deref() {
            Some(key) => request.header(KEY_HEADER, key),
            None => request,
        })
    }

    async fn send(request: reqwest::RequestBuilder) -> Result<reqwest::Response, TrendStoreError> {
        let response = request.send().await.map_err(|e| TrendStoreError::Network {
            reason: format!("HTTP request failed: {e}"),
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(TrendStoreError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn list(&self, queries: &[String]) -> Result<Vec<TrendRecord>, TrendStoreError> {
        let url = self.documents_url()?;
        let params: Vec<(&str, &str)> = queries.iter().map(|q| ("queries[]", q.as_str())).collect();

        let request = self.authorize(self.client.get(&url).query(&params))?;
        let list: DocumentList = Self::send(request)
            .await?
            .json()
            .await
            .map_err(|e| TrendStoreError::Parse {
                reason: format!("JSON parsing failed: {e}"),
            })?;

        Ok(list.documents)
    }
}

#[async_trait]
impl TrendStore for AppwriteTrendStore {
    async fn update_search_count(
        &self,
        query_text: &str,
        movie: &Movie,
    ) -> Result<(), TrendStoreError> {
        let key = normalize_search_term(query_text);
        let url = self.documents_url()?;

        let existing = self
            .list(&[query("equal", Some("searchTerm"), Some(json!([key])))])
            .await?;

        let request = match existing.first() {
            Some(record) => {
                tracing::debug!(
                    search_term = %key,
                    count = record.count + 1,
                    "Incrementing search count"
                );
                self.client
                    .patch(format!("{url}/{}", record.id))
                    .json(&json!({ "data": { "count": record.count + 1 } }))
            }
            None => {
                tracing::debug!(search_term = %key, "Creating search count record");
                self.client.post(&url).json(&json!({
                    "documentId": "unique()",
                    "data": {
                        "searchTerm": key,
                        "count": 1,
                        "movie_id": movie.id,
                        "poster_url": record_poster_url(movie, &self.image_base_url),
                    }
                }))
            }
        };

        Self::send(self.authorize(request)?).await?;
        Ok(())
    }

    async fn get_trending_movies(&self) -> Result<Vec<TrendRecord>, TrendStoreError> {
        let mut records = self
            .list(&[
                query("limit", None, Some(json!([self.limit]))),
                query("orderDesc", Some("count"), None),
            ])
            .await?;

        // Order and limit are re-applied locally.
        records.sort_by(|a, b| b.count.cmp(&a.count));
        records.truncate(self.limit);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_encoding() {
        let equal: Value =
            serde_json::from_str(&query("equal", Some("searchTerm"), Some(json!(["batman"]))))
                .unwrap();
        assert_eq!(
            equal,
            json!({"method": "equal", "attribute": "searchTerm", "values": ["batman"]})
        );

        let limit: Value = serde_json::from_str(&query("limit", None, Some(json!([5])))).unwrap();
        assert_eq!(limit, json!({"method": "limit", "values": [5]}));
    }

    #[tokio::test]
    async fn test_missing_identifiers_are_reported() {
        let store = AppwriteTrendStore::new(&TrendStoreConfig::default(), "https://img");

        let err = store.get_trending_movies().await.unwrap_err();
        assert_eq!(
            err,
            TrendStoreError::NotConfigured {
                missing: "database id"
            }
        );
    }
}
