//! Common test utilities for API testing with mocks.
//!
//! This module provides a test fixture that builds the router in-process
//! with a mock recommender and text source injected, so the HTTP surface
//! can be exercised without network access.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use verse_core::{
    testing::{FixedPicker, MockRecommender, MockTextSource},
    Config, FavoritesStore, RecommendationResolver, SqliteFavoritesStore,
};

/// Re-export fixtures for test convenience
pub use verse_core::testing::fixtures;

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}

/// Test fixture with mock dependencies.
///
/// Provides an in-process server with fully controllable mocks for:
/// - The recommend stage (MockRecommender)
/// - Text resolution (MockTextSource)
///
/// `/recommend` is served from the built-in sample corpus and favorites go
/// to a SQLite file in a temp dir.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_resolve() {
///     let fixture = TestFixture::new().await;
///     fixture.recommender.set_results(vec![Recommendation::bare(2, 255)]).await;
///
///     let response = fixture.post("/api/v1/resolve", json!({"theme": "patience"})).await;
///     assert_eq!(response.body["status"], "success");
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock recommender - configure results, errors and delays
    pub recommender: Arc<MockRecommender>,
    /// Mock text source - configure text and failures
    pub text_source: Arc<MockTextSource>,
    /// Favorites store shared with the router
    pub favorites: Arc<SqliteFavoritesStore>,
    /// Temporary directory for the test database
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    /// Raw body, for non-JSON responses.
    pub text: String,
}

impl TestFixture {
    /// Create a new test fixture whose recommender returns Ayat al-Kursi.
    pub async fn new() -> Self {
        Self::with_recommender(MockRecommender::with_pairs(&[(2, 255)])).await
    }

    /// Create a test fixture around a preconfigured recommender.
    pub async fn with_recommender(recommender: MockRecommender) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");

        let mut config = Config::default();
        config.database.path = db_path.clone();

        // Create mocks
        let recommender = Arc::new(recommender);
        let text_source = Arc::new(MockTextSource::new());

        let resolver = RecommendationResolver::new(
            Arc::clone(&recommender) as Arc<dyn verse_core::Recommender>,
            Arc::clone(&text_source) as Arc<dyn verse_core::TextSource>,
        )
        .with_picker(Arc::new(FixedPicker::new(0)))
        .with_recommend_timeout(Duration::from_millis(200));

        let favorites = Arc::new(
            SqliteFavoritesStore::new(&db_path).expect("Failed to create favorites store"),
        );

        let state = Arc::new(verse_server::state::AppState::new(
            config,
            Arc::new(resolver),
            Arc::new(fixtures::sample_corpus()),
            Arc::clone(&favorites) as Arc<dyn FavoritesStore>,
        ));

        // Create router
        let router = verse_server::api::create_router(state);

        Self {
            router,
            recommender,
            text_source,
            favorites,
            temp_dir,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a POST request without a body.
    pub async fn post_empty(&self, path: &str) -> TestResponse {
        self.request("POST", path, None).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None).await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).into_owned();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body, text }
    }

    /// Start a journey and return its id.
    pub async fn start_journey(&self) -> String {
        let response = self.post_empty("/api/v1/journeys").await;
        assert_status!(response, StatusCode::CREATED);
        response.body["id"].as_str().unwrap().to_string()
    }
}
