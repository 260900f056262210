//! HTTP-level tests for single-image caption operations.

mod common;

use std::path::PathBuf;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, get, image_folder, post_json, put_json, scan_into, MockBackend,
};

/// Path of the single image scanned by [`one_image_app`].
fn image_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join("1.png")
}

async fn one_image_app(
    backend: MockBackend,
) -> (axum::Router, std::sync::Arc<MockBackend>, tempfile::TempDir, tempfile::TempDir) {
    let (app, backend, settings) = build_test_app(backend);
    let dir = image_folder(&["1.png"], &[]);
    scan_into(&app, &dir).await;
    (app, backend, settings, dir)
}

#[tokio::test]
async fn generate_captions_and_autosaves() {
    let (app, backend, _settings, dir) = one_image_app(MockBackend::default()).await;
    let path = image_path(&dir);

    let response = post_json(
        &app,
        "/api/caption",
        serde_json::json!({
            "image_path": path.to_string_lossy(),
            "api_key": "sk-test",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["caption"], "caption for 1.png");

    // Generation auto-saves: the backend holds the caption and the
    // catalog progress reflects it.
    assert_eq!(
        backend.saved.lock().unwrap().get(&path).map(String::as_str),
        Some("caption for 1.png")
    );
    let progress = body_json(get(&app, "/api/progress").await).await;
    assert_eq!(progress["captioned"], 1);
}

#[tokio::test]
async fn generate_without_api_key_is_rejected() {
    let (app, backend, _settings, dir) = one_image_app(MockBackend::default()).await;

    let response = post_json(
        &app,
        "/api/caption",
        serde_json::json!({ "image_path": image_path(&dir).to_string_lossy() }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["detail"], "API key is required");
    assert!(backend.saved.lock().unwrap().is_empty());
}

#[tokio::test]
async fn generation_failure_surfaces_backend_detail() {
    let (app, _backend, _settings, dir) = one_image_app(MockBackend {
        fail_generate: true,
        ..MockBackend::default()
    })
    .await;

    let response = post_json(
        &app,
        "/api/caption",
        serde_json::json!({
            "image_path": image_path(&dir).to_string_lossy(),
            "api_key": "sk-test",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["detail"], "model exploded");
}

#[tokio::test]
async fn api_key_supplied_on_use_is_remembered() {
    let (app, _backend, _settings, dir) = one_image_app(MockBackend::default()).await;

    post_json(
        &app,
        "/api/caption",
        serde_json::json!({
            "image_path": image_path(&dir).to_string_lossy(),
            "api_key": "sk-remember-me",
        }),
    )
    .await;

    let settings = body_json(get(&app, "/api/settings").await).await;
    assert_eq!(settings["apiKey"], "sk-remember-me");
}

#[tokio::test]
async fn save_applies_trigger_policy_and_reports_caption_path() {
    let (app, backend, _settings, dir) = one_image_app(MockBackend::default()).await;
    let path = image_path(&dir);

    // Enable the trigger policy.
    let mut settings = body_json(get(&app, "/api/settings").await).await;
    settings["includeTrigger"] = serde_json::json!(true);
    let response = put_json(&app, "/api/settings", settings).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(
        &app,
        "/api/save",
        serde_json::json!({
            "image_path": path.to_string_lossy(),
            "caption_text": "a cat",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "success");
    assert!(body["path"].as_str().unwrap().ends_with("1.txt"));

    assert_eq!(
        backend.saved.lock().unwrap().get(&path).map(String::as_str),
        Some("[trigger] a cat")
    );
}

#[tokio::test]
async fn save_empty_caption_is_rejected() {
    let (app, _backend, _settings, dir) = one_image_app(MockBackend::default()).await;

    let response = post_json(
        &app,
        "/api/save",
        serde_json::json!({
            "image_path": image_path(&dir).to_string_lossy(),
            "caption_text": "   ",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["detail"], "Caption is empty");
}

#[tokio::test]
async fn delete_is_idempotent_over_http() {
    let (app, _backend, _settings, dir) = one_image_app(MockBackend::default()).await;
    let path = image_path(&dir);

    post_json(
        &app,
        "/api/save",
        serde_json::json!({
            "image_path": path.to_string_lossy(),
            "caption_text": "a cat",
        }),
    )
    .await;

    let body = serde_json::json!({ "image_path": path.to_string_lossy() });

    let response = post_json(&app, "/api/delete", body.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let first = body_json(response).await;
    assert_eq!(first["status"], "success");
    assert_eq!(first["deleted"], true);

    // Deleting again succeeds silently.
    let response = post_json(&app, "/api/delete", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["deleted"], false);

    let progress = body_json(get(&app, "/api/progress").await).await;
    assert_eq!(progress["captioned"], 0);
}

#[tokio::test]
async fn operations_on_unknown_image_are_not_found() {
    let (app, _backend, _settings, _dir) = one_image_app(MockBackend::default()).await;

    let response = post_json(
        &app,
        "/api/save",
        serde_json::json!({
            "image_path": "/no/such.png",
            "caption_text": "a cat",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
