//! CORS preflight tests

use axum::http::StatusCode;

use crate::common::TestApp;

#[tokio::test]
async fn test_preflight_allows_configured_origin_and_patch() {
    let app = TestApp::new().await;

    let response = app
        .request_with_headers(
            "OPTIONS",
            "/api/studies/1/status",
            &[
                ("Origin", "http://localhost:3000"),
                ("Access-Control-Request-Method", "PATCH"),
                ("Access-Control-Request-Headers", "content-type"),
            ],
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(
        headers["access-control-allow-origin"],
        "http://localhost:3000"
    );
    let methods = headers["access-control-allow-methods"].to_str().unwrap();
    assert!(methods.contains("PATCH"));
    assert!(methods.contains("DELETE"));
    assert_eq!(headers["access-control-max-age"], "600");
}

#[tokio::test]
async fn test_unlisted_origin_gets_no_allow_origin_header() {
    let app = TestApp::new().await;

    let response = app
        .request_with_headers(
            "OPTIONS",
            "/api/chats",
            &[
                ("Origin", "https://evil.example.com"),
                ("Access-Control-Request-Method", "POST"),
            ],
        )
        .await;

    assert!(response.headers().get("access-control-allow-origin").is_none());
}
