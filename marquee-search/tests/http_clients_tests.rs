//! HTTP-level tests for the TMDB catalog and the Appwrite trend store.
//!
//! Each test starts an in-process axum server on an ephemeral port that
//! records every request and answers with a canned response.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use marquee_core::{CatalogConfig, Movie, TrendStoreConfig};
use marquee_search::errors::TRANSPORT_FAILURE_MESSAGE;
use marquee_search::{
    AppwriteTrendStore, CatalogError, MovieCatalog, TmdbCatalog, TrendStore, TrendStoreError,
};
use parking_lot::Mutex;
use serde_json::{Value, json};

/// One request as seen by the fixture server.
#[derive(Debug, Clone)]
struct RecordedRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    body: String,
}

impl RecordedRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    fn query_values(&self, key: &str) -> Vec<&str> {
        self.query
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    fn json_body(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

type Responder = Arc<dyn Fn(&Method, &str) -> (StatusCode, String) + Send + Sync>;

#[derive(Clone)]
struct FixtureState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    responder: Responder,
}

/// Canned-response server recording every request it receives.
struct FixtureServer {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FixtureServer {
    async fn start<F>(responder: F) -> Self
    where
        F: Fn(&Method, &str) -> (StatusCode, String) + Send + Sync + 'static,
    {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = FixtureState {
            requests: Arc::clone(&requests),
            responder: Arc::new(responder),
        };
        let app = Router::new().fallback(record).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    /// Server answering every request with the same status and JSON body.
    async fn answering(status: StatusCode, body: Value) -> Self {
        let body = body.to_string();
        Self::start(move |_, _| (status, body.clone())).await
    }

    fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }
}

async fn record(
    State(state): State<FixtureState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let query = uri
        .query()
        .unwrap_or_default()
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (
                urlencoding::decode(key).unwrap().into_owned(),
                urlencoding::decode(value).unwrap().into_owned(),
            )
        })
        .collect();

    let (status, response_body) = (state.responder)(&method, uri.path());
    state.requests.lock().push(RecordedRequest {
        method,
        path: uri.path().to_string(),
        query,
        headers,
        body,
    });

    (
        status,
        [("content-type", "application/json")],
        response_body,
    )
        .into_response()
}

fn catalog_for(server: &FixtureServer) -> TmdbCatalog {
    TmdbCatalog::new(&CatalogConfig {
        base_url: server.base_url.clone(),
        api_token: Some("test-token".to_string()),
        ..Default::default()
    })
}

fn trend_config(server: &FixtureServer) -> TrendStoreConfig {
    TrendStoreConfig {
        endpoint: server.base_url.clone(),
        project_id: Some("proj".to_string()),
        database_id: Some("db".to_string()),
        collection_id: Some("metrics".to_string()),
        api_key: Some("secret".to_string()),
        trending_limit: 2,
    }
}

const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";
const DOCUMENTS_PATH: &str = "/databases/db/collections/metrics/documents";

#[tokio::test]
async fn test_search_sends_bearer_token_and_encoded_query() {
    let server = FixtureServer::answering(
        StatusCode::OK,
        json!({
            "page": 1,
            "results": [
                {"id": 155, "title": "The Dark Knight", "poster_path": "/dk.jpg",
                 "release_date": "2008-07-16", "vote_average": 8.5, "original_language": "en"}
            ]
        }),
    )
    .await;

    let page = catalog_for(&server).search("the dark knight").await.unwrap();

    assert_eq!(page.status, 200);
    assert_eq!(page.results.len(), 1);
    assert_eq!(page.results[0].title, "The Dark Knight");
    assert_eq!(page.results[0].release_year(), Some(2008));

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.path, "/search/movie");
    assert_eq!(request.query_values("query"), vec!["the dark knight"]);
    assert_eq!(request.header("authorization"), Some("Bearer test-token"));
    assert_eq!(request.header("accept"), Some("application/json"));
}

#[tokio::test]
async fn test_discover_uses_default_listing() {
    let server = FixtureServer::answering(
        StatusCode::OK,
        json!({"results": [{"id": 1, "title": "Popular"}, {"id": 2, "title": "Also Popular"}]}),
    )
    .await;

    let page = catalog_for(&server).discover().await.unwrap();

    assert_eq!(page.results.len(), 2);
    let requests = server.requests();
    assert_eq!(requests[0].path, "/discover/movie");
    assert!(requests[0].query.is_empty());
}

#[tokio::test]
async fn test_missing_results_is_empty_page() {
    let server = FixtureServer::answering(StatusCode::OK, json!({"page": 1})).await;

    let page = catalog_for(&server).search("nothing").await.unwrap();

    assert!(page.results.is_empty());
}

#[tokio::test]
async fn test_server_error_is_status_failure() {
    let server =
        FixtureServer::answering(StatusCode::INTERNAL_SERVER_ERROR, json!({"error": "boom"})).await;

    let error = catalog_for(&server).search("bat").await.unwrap_err();

    assert_eq!(error, CatalogError::Status { status: 500 });
    assert_eq!(error.user_message(), TRANSPORT_FAILURE_MESSAGE);
}

#[tokio::test]
async fn test_failure_flag_in_body_is_api_failure() {
    let server = FixtureServer::answering(
        StatusCode::OK,
        json!({"Response": "False", "Error": "Movie not found!"}),
    )
    .await;

    let error = catalog_for(&server).search("qwerty").await.unwrap_err();

    assert_eq!(
        error,
        CatalogError::Api {
            message: Some("Movie not found!".to_string())
        }
    );
    assert_eq!(error.user_message(), "Movie not found!");
}

#[tokio::test]
async fn test_invalid_json_is_parse_failure() {
    let server = FixtureServer::start(|_, _| (StatusCode::OK, "<html>".to_string())).await;

    let error = catalog_for(&server).discover().await.unwrap_err();

    assert!(matches!(error, CatalogError::Parse { .. }));
    assert_eq!(error.user_message(), TRANSPORT_FAILURE_MESSAGE);
}

#[tokio::test]
async fn test_unreachable_catalog_is_network_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let catalog = TmdbCatalog::new(&CatalogConfig {
        base_url: format!("http://{addr}"),
        ..Default::default()
    });
    let error = catalog.discover().await.unwrap_err();

    assert!(matches!(error, CatalogError::Network { .. }));
}

#[tokio::test]
async fn test_trending_query_and_headers() {
    let server = FixtureServer::answering(
        StatusCode::OK,
        json!({
            "total": 3,
            "documents": [
                {"$id": "a", "searchTerm": "heat", "count": 1, "movie_id": 949, "poster_url": ""},
                {"$id": "b", "searchTerm": "batman", "count": 7, "movie_id": 268,
                 "poster_url": "https://image.tmdb.org/t/p/w500/batman.jpg"},
                {"$id": "c", "searchTerm": "parasite", "count": 3, "movie_id": 496243, "poster_url": ""}
            ]
        }),
    )
    .await;
    let store = AppwriteTrendStore::new(&trend_config(&server), IMAGE_BASE);

    let trending = store.get_trending_movies().await.unwrap();

    let terms: Vec<_> = trending.iter().map(|r| r.search_term.as_str()).collect();
    assert_eq!(terms, vec!["batman", "parasite"]);
    assert_eq!(trending[0].id, "b");

    let requests = server.requests();
    let request = &requests[0];
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.path, DOCUMENTS_PATH);
    assert_eq!(request.header("x-appwrite-project"), Some("proj"));
    assert_eq!(request.header("x-appwrite-key"), Some("secret"));

    let queries: Vec<Value> = request
        .query_values("queries[]")
        .into_iter()
        .map(|q| serde_json::from_str(q).unwrap())
        .collect();
    assert_eq!(
        queries,
        vec![
            json!({"method": "limit", "values": [2]}),
            json!({"method": "orderDesc", "attribute": "count"}),
        ]
    );
}

#[tokio::test]
async fn test_existing_term_is_incremented() {
    let server = FixtureServer::start(|method, _| {
        let body = if *method == Method::GET {
            json!({"documents": [
                {"$id": "doc-1", "searchTerm": "batman", "count": 4, "movie_id": 268, "poster_url": ""}
            ]})
        } else {
            json!({"$id": "doc-1"})
        };
        (StatusCode::OK, body.to_string())
    })
    .await;
    let store = AppwriteTrendStore::new(&trend_config(&server), IMAGE_BASE);

    store
        .update_search_count("  Batman ", &Movie::new(268, "Batman"))
        .await
        .unwrap();

    let requests = server.requests();
    assert_eq!(requests.len(), 2);

    let lookup: Value = serde_json::from_str(requests[0].query_values("queries[]")[0]).unwrap();
    assert_eq!(
        lookup,
        json!({"method": "equal", "attribute": "searchTerm", "values": ["batman"]})
    );

    assert_eq!(requests[1].method, Method::PATCH);
    assert_eq!(requests[1].path, format!("{DOCUMENTS_PATH}/doc-1"));
    assert_eq!(requests[1].json_body(), json!({"data": {"count": 5}}));
    assert_eq!(requests[1].header("x-appwrite-project"), Some("proj"));
}

#[tokio::test]
async fn test_new_term_creates_record() {
    let server = FixtureServer::start(|method, _| {
        let body = if *method == Method::GET {
            json!({"total": 0, "documents": []})
        } else {
            json!({"$id": "new"})
        };
        (StatusCode::CREATED, body.to_string())
    })
    .await;
    let store = AppwriteTrendStore::new(&trend_config(&server), IMAGE_BASE);
    let movie = Movie::new(603, "The Matrix").with_poster("/matrix.jpg");

    store.update_search_count("Matrix", &movie).await.unwrap();

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].method, Method::POST);
    assert_eq!(requests[1].path, DOCUMENTS_PATH);
    assert_eq!(
        requests[1].json_body(),
        json!({
            "documentId": "unique()",
            "data": {
                "searchTerm": "matrix",
                "count": 1,
                "movie_id": 603,
                "poster_url": "https://image.tmdb.org/t/p/w500/matrix.jpg"
            }
        })
    );
}

#[tokio::test]
async fn test_rejected_request_keeps_status_and_body() {
    let server = FixtureServer::start(|_, _| {
        (
            StatusCode::UNAUTHORIZED,
            json!({"message": "Missing scope"}).to_string(),
        )
    })
    .await;
    let store = AppwriteTrendStore::new(&trend_config(&server), IMAGE_BASE);

    let error = store.get_trending_movies().await.unwrap_err();

    match error {
        TrendStoreError::Status { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("Missing scope"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_project_sends_nothing() {
    let server = FixtureServer::answering(StatusCode::OK, json!({"documents": []})).await;
    let config = TrendStoreConfig {
        project_id: None,
        ..trend_config(&server)
    };
    let store = AppwriteTrendStore::new(&config, IMAGE_BASE);

    let error = store.get_trending_movies().await.unwrap_err();

    assert_eq!(
        error,
        TrendStoreError::NotConfigured {
            missing: "project id"
        }
    );
    assert!(server.requests().is_empty());
}
