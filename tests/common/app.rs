//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use synthmri::models::AppConfig;
use synthmri::server::{build_router, create_app_state, AppState};
use synthmri::services::FsArtifactStore;

use super::fixtures;

/// Test application with router and direct access to the store
pub struct TestApp {
    router: axum::Router,
    pub store: Arc<FsArtifactStore>,
    // Dropped last: removes the static tree
    static_dir: TempDir,
}

impl TestApp {
    /// Create a new test application backed by a fresh temporary directory
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a test application after adjusting the default configuration
    pub async fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let static_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let state = Self::create_state_in(static_dir.path(), adjust).await;

        let store = state.store.clone();
        let router = build_router(state);

        Self {
            router,
            store,
            static_dir,
        }
    }

    /// Create application state rooted at `dir` for custom router configuration
    pub async fn create_state_in(dir: &Path, adjust: impl FnOnce(&mut AppConfig)) -> AppState {
        let mut config = AppConfig {
            static_dir: dir.to_path_buf(),
            ..AppConfig::default()
        };
        adjust(&mut config);
        create_app_state(config)
            .await
            .expect("Failed to create app state")
    }

    pub fn static_dir(&self) -> &Path {
        self.static_dir.path()
    }

    /// Number of files currently in the uploads directory
    pub fn upload_count(&self) -> usize {
        std::fs::read_dir(self.store.uploads_dir())
            .expect("uploads dir should exist")
            .count()
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// POST a multipart form with a single file field
    pub async fn post_file(
        &self,
        path: &str,
        field: &str,
        filename: &str,
        content: &[u8],
    ) -> TestResponse {
        let (content_type, body) = fixtures::multipart_body(field, filename, content);
        let request = Request::post(path)
            .header("Content-Type", content_type)
            .body(Body::from(body))
            .unwrap();
        self.request(request).await
    }

    /// Upload an image to `/api/upload` under the expected field name
    pub async fn upload(&self, filename: &str, content: &[u8]) -> TestResponse {
        self.post_file("/api/upload", "mri_image", filename, content)
            .await
    }

    /// Upload an image and return the generated URL
    pub async fn upload_ok(&self, filename: &str, content: &[u8]) -> String {
        let response = self.upload(filename, content).await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "upload failed: {}",
            response.text()
        );
        let json: serde_json::Value = response.json();
        json["generated"]
            .as_str()
            .expect("generated should be a string")
            .to_string()
    }

    /// Fetch the gallery and return its URLs
    pub async fn gallery(&self) -> Vec<String> {
        let response = self.get("/api/gallery").await;
        assert_eq!(response.status, StatusCode::OK);
        let json: serde_json::Value = response.json();
        json["images"]
            .as_array()
            .expect("images should be an array")
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect()
    }

    /// Send a request to the router
    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Get raw body bytes
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Check if response is a JPEG image
    pub fn is_jpeg(&self) -> bool {
        self.body.len() >= 3 && self.body[0..3] == [0xFF, 0xD8, 0xFF]
    }
}
