//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status,
        expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert response is a decodable 256x256 JPEG served as image/jpeg
pub fn assert_canonical_jpeg(response: &TestResponse) {
    assert_ok(response);
    assert!(
        response.is_jpeg(),
        "Expected JPEG image, got {} bytes starting with {:?}",
        response.body.len(),
        &response.body[..8.min(response.body.len())]
    );

    let content_type = response
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok());
    assert_eq!(
        content_type,
        Some("image/jpeg"),
        "Expected Content-Type: image/jpeg"
    );

    let decoded = image::load_from_memory(&response.body).expect("JPEG should decode");
    assert_eq!((decoded.width(), decoded.height()), (256, 256));
}

/// Assert an error response carries the JSON error envelope
pub fn assert_json_error(response: &TestResponse, expected: StatusCode) {
    assert_status(response, expected);
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["status"].as_u64(),
        Some(expected.as_u16() as u64),
        "Expected JSON status {}, got {:?}. Full response: {}",
        expected.as_u16(),
        json["status"],
        serde_json::to_string_pretty(&json).unwrap()
    );
    assert!(json["error"].is_string(), "Expected error message");
}

/// Assert a generated URL has the `/static/generated/<32 hex>.jpg` shape
pub fn assert_generated_url(url: &str) {
    let name = url
        .strip_prefix("/static/generated/")
        .unwrap_or_else(|| panic!("unexpected prefix: {url}"));
    let token = name
        .strip_suffix(".jpg")
        .unwrap_or_else(|| panic!("expected .jpg suffix: {url}"));
    assert_eq!(token.len(), 32, "token should be 32 hex chars: {url}");
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}
