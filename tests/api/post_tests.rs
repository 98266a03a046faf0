//! Post, comment and like API tests
//!
//! These cover request handling that is decided before any database work:
//! routing per post kind, path and query parsing, and form validation.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use test_case::test_case;

use crate::common::{body_json, random_username, MultipartForm, TestApp};

#[test_case("/api/chats/abc")]
#[test_case("/api/studies/1.5")]
#[test_case("/api/questions/-")]
#[tokio::test]
async fn test_invalid_post_id_is_bad_request(uri: &str) {
    let app = TestApp::new().await;

    let response = app.get(uri).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Invalid post ID");
}

#[tokio::test]
async fn test_chats_have_no_status_route() {
    let app = TestApp::new().await;
    let body = format!(r#"{{"username":"{}"}}"#, random_username());

    let response = app.json("PATCH", "/api/chats/1/status", &body).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test_case("studies")]
#[test_case("questions")]
#[tokio::test]
async fn test_status_route_parses_id(collection: &str) {
    let app = TestApp::new().await;
    let body = format!(r#"{{"username":"{}"}}"#, random_username());

    let response = app
        .json("PATCH", &format!("/api/{}/x/status", collection), &body)
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_post_without_title_is_rejected() {
    let app = TestApp::new().await;
    let username = random_username();

    let response = app
        .multipart(
            "POST",
            "/api/studies",
            MultipartForm::new()
                .text("username", &username)
                .text("content", "Weekly Rust study"),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], 10007);
}

#[tokio::test]
async fn test_create_post_without_username_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .multipart(
            "POST",
            "/api/questions",
            MultipartForm::new()
                .text("title", "Lifetimes")
                .text("content", "Why does this not borrow check?"),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_post_requires_multipart_body() {
    let app = TestApp::new().await;

    let response = app
        .json("POST", "/api/chats", r#"{"title":"hi","content":"there"}"#)
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test_case("/api/studies?status=SOLVED")]
#[test_case("/api/questions?status=ACTIVE")]
#[test_case("/api/questions?status=bogus")]
#[tokio::test]
async fn test_status_filter_must_match_kind(uri: &str) {
    let app = TestApp::new().await;

    let response = app.get(uri).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_user_collection_is_not_found() {
    let app = TestApp::new().await;

    let response = app.get("/api/users/alice/podcasts").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Unknown post collection: podcasts");
}

#[tokio::test]
async fn test_unknown_liked_collection_is_not_found() {
    let app = TestApp::new().await;

    let response = app.get("/api/users/alice/likes/podcasts").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_comment_is_rejected() {
    let app = TestApp::new().await;
    let body = format!(r#"{{"username":"{}","contents":""}}"#, random_username());

    let response = app.json("POST", "/api/posts/1/comments", &body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_like_requires_numeric_post_id() {
    let app = TestApp::new().await;
    let body = format!(r#"{{"username":"{}"}}"#, random_username());

    let response = app.json("POST", "/api/chats/first/likes", &body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_post_with_too_many_images_is_rejected() {
    let app = TestApp::new().await;
    let mut form = MultipartForm::new()
        .text("username", &random_username())
        .text("title", "Screenshots")
        .text("content", "Eleven of them");
    for i in 0..11 {
        form = form.file("images", &format!("shot-{}.png", i), "image/png", b"\x89PNG");
    }

    let response = app.multipart("POST", "/api/chats", form).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "images: At most 10 images per post");
}

#[tokio::test]
async fn test_oversized_upload_is_payload_too_large() {
    let app = TestApp::new().await;
    // Above the 1 MiB body limit of the test router
    let data = vec![0u8; 2 * 1024 * 1024];
    let form = MultipartForm::new()
        .text("username", &random_username())
        .text("title", "Huge")
        .text("content", "Too big")
        .file("images", "huge.png", "image/png", &data);

    let response = app.multipart("POST", "/api/studies", form).await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body_json(response).await["code"], 10006);
}
