//! Common test utilities for E2E testing with mocks.
//!
//! Builds an in-process server with mock dependencies injected so requests
//! can be exercised end to end without network access, ffmpeg, or a real
//! model behind it.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use mediscribe_core::{
    testing::{MockAudioNormalizer, MockFetcher, MockImageNormalizer, MockModelClient},
    Config, FetcherConfig, GeminiConfig, MediaPipeline, NormalizerConfig, PipelineConfig,
    ServerConfig, SummaryService,
};

/// Test fixture for E2E testing with mock dependencies.
///
/// Keeps handles to the mocks so tests can configure responses and assert
/// on recorded calls after driving requests through the router.
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock fetcher - configure per-URL bytes or failures
    pub fetcher: Arc<MockFetcher>,
    /// Mock audio normalizer
    pub audio: Arc<MockAudioNormalizer>,
    /// Mock image normalizer
    pub image: Arc<MockImageNormalizer>,
    /// Mock model client - canned summary text
    pub model: Arc<MockModelClient>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a new test fixture with default mocks and a canned summary.
    pub fn new() -> Self {
        Self::with_model(MockModelClient::with_response("Mock consultation summary"))
    }

    /// Create a test fixture around a specific model mock.
    pub fn with_model(model: MockModelClient) -> Self {
        Self::build(model, true)
    }

    /// Create a test fixture whose startup transcoder probe failed.
    pub fn with_ffmpeg_unavailable() -> Self {
        Self::build(
            MockModelClient::with_response("Mock consultation summary"),
            false,
        )
    }

    fn build(model: MockModelClient, ffmpeg_available: bool) -> Self {
        let fetcher = Arc::new(MockFetcher::new());
        let audio = Arc::new(MockAudioNormalizer::new());
        let image = Arc::new(MockImageNormalizer::new());
        let model = Arc::new(model);

        let config = Config {
            gemini: GeminiConfig {
                api_key: "test-key".to_string(),
                ..GeminiConfig::default()
            },
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
                allowed_origin: None,
            },
            fetcher: FetcherConfig::default(),
            normalizer: NormalizerConfig::default(),
            pipeline: PipelineConfig::default(),
        };

        let pipeline = MediaPipeline::new(
            Arc::clone(&fetcher) as Arc<dyn mediscribe_core::Fetcher>,
            Arc::clone(&audio) as Arc<dyn mediscribe_core::AudioNormalizer>,
            Arc::clone(&image) as Arc<dyn mediscribe_core::ImageNormalizer>,
        );

        let service = SummaryService::new(
            pipeline,
            Arc::clone(&model) as Arc<dyn mediscribe_core::ModelClient>,
        );

        let state = Arc::new(mediscribe_server::AppState::new(
            config,
            service,
            ffmpeg_available,
        ));
        let router = mediscribe_server::create_router(state);

        Self {
            router,
            fetcher,
            audio,
            image,
            model,
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

        self.send(request_builder.body(body).unwrap()).await
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

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

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
