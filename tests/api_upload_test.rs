//! Tests for POST /api/upload and its legacy alias.

mod common;

use axum::http::StatusCode;
use common::{fixtures, TestApp};

#[tokio::test]
async fn test_upload_returns_generated_url() {
    let app = TestApp::new().await;

    let response = app.upload("brain.png", &fixtures::gray_png(120, 90)).await;

    common::assert_ok(&response);
    let json: serde_json::Value = response.json();
    let url = json["generated"].as_str().expect("generated URL");
    common::assert_generated_url(url);
}

#[tokio::test]
async fn test_upload_stores_raw_copy() {
    let app = TestApp::new().await;
    let source = fixtures::gray_png(64, 64);

    app.upload_ok("scan.png", &source).await;

    let entries: Vec<_> = std::fs::read_dir(app.store.uploads_dir())
        .unwrap()
        .map(|e| e.unwrap())
        .collect();
    assert_eq!(entries.len(), 1);

    let name = entries[0].file_name().into_string().unwrap();
    assert!(name.ends_with("_scan.png"), "unexpected upload name {name}");
    assert_eq!(std::fs::read(entries[0].path()).unwrap(), source);
}

#[tokio::test]
async fn test_upload_with_overlong_filename() {
    let app = TestApp::new().await;
    let filename = format!("{}.png", "a".repeat(240));

    let url = app.upload_ok(&filename, &fixtures::gray_png(20, 20)).await;
    common::assert_canonical_jpeg(&app.get(&url).await);

    let entries: Vec<_> = std::fs::read_dir(app.store.uploads_dir())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].ends_with(".png"));
    assert!(entries[0].len() < 255);
}

#[tokio::test]
async fn test_upload_output_is_canonical_for_any_size() {
    let app = TestApp::new().await;

    for (w, h) in [(10, 10), (640, 480), (33, 700)] {
        let url = app.upload_ok("in.png", &fixtures::gray_png(w, h)).await;
        let image = app.get(&url).await;
        common::assert_canonical_jpeg(&image);
    }
}

#[tokio::test]
async fn test_upload_accepts_color_jpeg() {
    let app = TestApp::new().await;

    let url = app.upload_ok("photo.jpg", &fixtures::color_jpeg(200, 150)).await;

    common::assert_canonical_jpeg(&app.get(&url).await);
}

#[tokio::test]
async fn test_same_input_twice_gives_different_artifacts() {
    let app = TestApp::new().await;
    let source = fixtures::gray_png(100, 100);

    let first = app.upload_ok("same.png", &source).await;
    let second = app.upload_ok("same.png", &source).await;
    assert_ne!(first, second);

    // Fresh noise on every run, so the bytes differ too.
    let a = app.get(&first).await;
    let b = app.get(&second).await;
    assert_ne!(a.bytes(), b.bytes());
}

#[tokio::test]
async fn test_upload_garbage_fails_without_artifact() {
    let app = TestApp::new().await;

    let response = app.upload("fake.jpg", &fixtures::not_an_image()).await;

    common::assert_json_error(&response, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(app.gallery().await.is_empty());
    // The raw upload is written before decoding and stays behind.
    assert_eq!(app.upload_count(), 1);
}

#[tokio::test]
async fn test_upload_missing_field() {
    let app = TestApp::new().await;

    let response = app
        .post_file("/api/upload", "wrong_field", "a.png", &fixtures::gray_png(8, 8))
        .await;

    common::assert_json_error(&response, StatusCode::BAD_REQUEST);
    assert_eq!(app.upload_count(), 0);
}

#[tokio::test]
async fn test_upload_without_multipart_body() {
    let app = TestApp::new().await;

    let request = axum::http::Request::post("/api/upload")
        .header("Content-Type", "application/json")
        .body(axum::body::Body::from("{}"))
        .unwrap();
    let response = app.request(request).await;

    assert!(response.status.is_client_error());
}

#[tokio::test]
async fn test_legacy_upload_route() {
    let app = TestApp::new().await;

    let response = app
        .post_file(
            "/upload_dataset/",
            "mri_image",
            "legacy.png",
            &fixtures::gray_png(50, 50),
        )
        .await;

    common::assert_ok(&response);
    let json: serde_json::Value = response.json();
    let url = json["generated"].as_str().unwrap();
    common::assert_generated_url(url);
    assert_eq!(app.gallery().await, vec![url.to_string()]);
}

#[tokio::test]
async fn test_upload_over_body_limit_is_rejected() {
    let app = TestApp::with_config(|config| config.max_upload_bytes = 1024).await;

    // No Content-Length is set, so the limit trips while streaming the body
    let response = app.upload("big.png", &vec![0u8; 8 * 1024]).await;

    common::assert_json_error(&response, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(app.gallery().await.is_empty());
}

#[tokio::test]
async fn test_cors_headers_present() {
    let app = TestApp::new().await;

    let request = axum::http::Request::get("/api/gallery")
        .header("Origin", "http://127.0.0.1:5500")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.request(request).await;

    common::assert_ok(&response);
    assert_eq!(
        response
            .headers
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
