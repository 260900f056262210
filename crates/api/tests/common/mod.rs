//! Shared helpers for API integration tests.
//!
//! Uses Axum's `tower::ServiceExt` to send requests directly to the
//! router, with a scripted captioning backend so no network is touched.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use capdeck_api::config::ServerConfig;
use capdeck_api::routes;
use capdeck_api::state::AppState;
use capdeck_engine::{BackendError, CaptionBackend};

// ---------------------------------------------------------------------------
// Scripted backend
// ---------------------------------------------------------------------------

/// Captioning backend double: deterministic captions, optional failure
/// and latency, and an inspectable store of saved captions.
#[derive(Default)]
pub struct MockBackend {
    /// Fail every generation with a fixed detail message.
    pub fail_generate: bool,
    /// Artificial per-generation latency in milliseconds.
    pub generate_delay_ms: u64,
    pub saved: Mutex<HashMap<PathBuf, String>>,
}

#[async_trait]
impl CaptionBackend for MockBackend {
    async fn generate_caption(
        &self,
        _api_key: &str,
        _model: &str,
        path: &Path,
    ) -> Result<String, BackendError> {
        if self.generate_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.generate_delay_ms)).await;
        }
        if self.fail_generate {
            return Err(BackendError::Generation("model exploded".to_string()));
        }
        let name = path.file_name().unwrap().to_string_lossy();
        Ok(format!("caption for {name}"))
    }

    async fn save_caption(&self, path: &Path, text: &str) -> Result<(), BackendError> {
        self.saved
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), text.to_string());
        Ok(())
    }

    async fn delete_caption(&self, path: &Path) -> Result<bool, BackendError> {
        Ok(self.saved.lock().unwrap().remove(path).is_some())
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a `ServerConfig` with safe test defaults, keeping the settings
/// file inside `dir`.
pub fn test_config(dir: &tempfile::TempDir) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        settings_path: dir.path().join("settings.json"),
        openai_api_url: "http://localhost:0".to_string(),
    }
}

/// Build the application router around a scripted backend.
///
/// Returns the temp dir holding the settings file so it outlives the
/// test.
pub fn build_test_app(backend: MockBackend) -> (Router, Arc<MockBackend>, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let backend = Arc::new(backend);
    let state = AppState::new(
        Arc::new(test_config(&dir)),
        Arc::clone(&backend) as Arc<dyn CaptionBackend>,
    );
    (routes::router(state), backend, dir)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("send request")
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::PUT, uri, body).await
}

/// POST with an empty body (no JSON payload at all).
pub async fn post_empty(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("send request")
}

async fn send_json(app: &Router, method: Method, uri: &str, body: serde_json::Value) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("build request"),
        )
        .await
        .expect("send request")
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Collect a response body as raw bytes.
pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes()
        .to_vec()
}

/// Poll `GET /api/progress` until the batch run reports idle.
pub async fn wait_for_batch_idle(app: &Router) -> serde_json::Value {
    for _ in 0..200 {
        let progress = body_json(get(app, "/api/progress").await).await;
        if progress["batch"]["running"] == false {
            return progress;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("batch did not return to idle");
}

// ---------------------------------------------------------------------------
// Fixture folders
// ---------------------------------------------------------------------------

/// Create a folder of fake images; `captioned` names get a sidecar
/// caption `"old caption"`.
pub fn image_folder(files: &[&str], captioned: &[&str]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("create image dir");
    for name in files {
        std::fs::write(dir.path().join(name), b"fake image bytes").expect("write image");
    }
    for name in captioned {
        let sidecar = Path::new(name).with_extension("txt");
        std::fs::write(dir.path().join(sidecar), "old caption").expect("write caption");
    }
    dir
}

/// Scan `dir` into the app's catalog and return the wire entries.
pub async fn scan_into(app: &Router, dir: &tempfile::TempDir) -> serde_json::Value {
    let response = post_json(
        app,
        "/api/scan",
        serde_json::json!({ "folder_path": dir.path().to_string_lossy() }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    body_json(response).await
}
