//! HTTP-level tests for folder scanning and catalog loading.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, image_folder, post_json, scan_into, MockBackend};

#[tokio::test]
async fn scan_returns_sorted_entries_with_captions() {
    let (app, _backend, _settings) = build_test_app(MockBackend::default());
    let dir = image_folder(&["2.jpg", "1.png"], &["1.png"]);

    let entries = scan_into(&app, &dir).await;
    let entries = entries.as_array().expect("array of entries");
    assert_eq!(entries.len(), 2);

    // Sorted path order; 1.png carries its sidecar caption.
    assert_eq!(entries[0]["filename"], "1.png");
    assert_eq!(entries[0]["has_caption"], true);
    assert_eq!(entries[0]["caption_content"], "old caption");
    assert_eq!(entries[0]["status"], "captioned");
    assert!(entries[0]["absolute_path"]
        .as_str()
        .unwrap()
        .ends_with("1.png"));

    assert_eq!(entries[1]["filename"], "2.jpg");
    assert_eq!(entries[1]["has_caption"], false);
    assert_eq!(entries[1]["caption_content"], "");
    assert_eq!(entries[1]["status"], "ready");
}

#[tokio::test]
async fn scan_invalid_folder_is_bad_request() {
    let (app, _backend, _settings) = build_test_app(MockBackend::default());

    let response = post_json(
        &app,
        "/api/scan",
        serde_json::json!({ "folder_path": "/no/such/folder" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["detail"], "Invalid folder path");
}

#[tokio::test]
async fn scan_empty_path_is_bad_request() {
    let (app, _backend, _settings) = build_test_app(MockBackend::default());

    let response = post_json(&app, "/api/scan", serde_json::json!({ "folder_path": "  " })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn rescan_replaces_the_catalog_wholesale() {
    let (app, _backend, _settings) = build_test_app(MockBackend::default());

    let first = image_folder(&["a.png", "b.png", "c.png"], &[]);
    scan_into(&app, &first).await;
    let progress = body_json(get(&app, "/api/progress").await).await;
    assert_eq!(progress["total"], 3);

    let second = image_folder(&["only.webp"], &["only.webp"]);
    scan_into(&app, &second).await;
    let progress = body_json(get(&app, "/api/progress").await).await;
    assert_eq!(progress["total"], 1);
    assert_eq!(progress["captioned"], 1);
    assert_eq!(progress["percent"], 100.0);
}

#[tokio::test]
async fn scan_remembers_the_folder_path() {
    let (app, _backend, _settings) = build_test_app(MockBackend::default());
    let dir = image_folder(&["1.png"], &[]);

    scan_into(&app, &dir).await;

    let settings = body_json(get(&app, "/api/settings").await).await;
    assert_eq!(
        settings["folderPath"],
        dir.path().to_string_lossy().as_ref()
    );
}

#[tokio::test]
async fn progress_is_zero_safe_before_any_scan() {
    let (app, _backend, _settings) = build_test_app(MockBackend::default());

    let progress = body_json(get(&app, "/api/progress").await).await;
    assert_eq!(progress["total"], 0);
    assert_eq!(progress["captioned"], 0);
    assert_eq!(progress["percent"], 0.0);
    assert_eq!(progress["batch"]["running"], false);
}
