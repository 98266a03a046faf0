//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    response::IntoResponse,
    routing::{get, patch, post},
    Extension, Router,
};
use tower_http::services::ServeDir;

use super::handlers;
use crate::domain::PostKind;
use crate::infrastructure::metrics;
use crate::presentation::middleware::track_metrics;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    let storage = &state.settings.storage;
    let static_files = ServeDir::new(&storage.root);
    let public_url = normalize_mount(&storage.public_url);

    let mut router = Router::new()
        .nest("/api", api_routes())
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler));

    // Stored images are served from the uploader root when it is mounted locally
    if let Some(mount) = public_url {
        router = router.nest_service(&mount, static_files);
    }

    router
        .layer(middleware::from_fn(track_metrics))
        .layer(DefaultBodyLimit::max(state.settings.server.max_body_bytes))
        .with_state(state)
}

/// Mount point for a public URL that is a local path (`/static`), if any.
fn normalize_mount(public_url: &str) -> Option<String> {
    let trimmed = public_url.trim_end_matches('/');
    if trimmed.starts_with('/') && trimmed.len() > 1 && !trimmed.starts_with("/api") {
        Some(trimmed.to_string())
    } else {
        None
    }
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

/// API routes
fn api_routes() -> Router<AppState> {
    let mut router = Router::new();
    for kind in PostKind::ALL {
        router = router.nest(&format!("/{}", kind.collection()), post_routes(kind));
    }

    router
        .route("/posts/{post_id}/comments", post(handlers::comment::create_comment))
        .route(
            "/comments/{comment_id}",
            patch(handlers::comment::update_comment).delete(handlers::comment::delete_comment),
        )
        .route("/users/{username}/likes/{collection}", get(handlers::user::get_user_liked_posts))
        .route("/users/{username}/{collection}", get(handlers::user::get_user_posts))
}

/// Routes of one post collection. The kind reaches handlers as an extension.
fn post_routes(kind: PostKind) -> Router<AppState> {
    let mut router = Router::new()
        .route(
            "/",
            get(handlers::post::list_posts).post(handlers::post::create_post),
        )
        .route("/top/hits", get(handlers::post::top_by_hits))
        .route("/top/likes", get(handlers::post::top_by_likes))
        .route("/count", get(handlers::post::count_posts))
        .route(
            "/{id}",
            get(handlers::post::get_post)
                .put(handlers::post::update_post)
                .delete(handlers::post::delete_post),
        )
        .route("/{id}/likes", post(handlers::like::toggle_like));

    if kind.has_status() {
        router = router.route("/{id}/status", patch(handlers::post::update_status));
    }

    router.layer(Extension(kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("/static", Some("/static"))]
    #[test_case("/static/", Some("/static"))]
    #[test_case("https://cdn.example.com/board", None)]
    #[test_case("/", None)]
    #[test_case("/api/files", None)]
    fn test_normalize_mount(input: &str, expected: Option<&str>) {
        assert_eq!(normalize_mount(input).as_deref(), expected);
    }
}
