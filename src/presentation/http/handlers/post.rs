//! Post Handlers
//!
//! One set of handlers serves chats, studies and questions; the router
//! attaches the [`PostKind`] of each collection as a request extension.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use super::{parse_id, post_service};
use crate::application::dto::request::{PostForm, PostListQuery, UsernameRequest};
use crate::application::dto::response::{
    CountResponse, PageResponse, PostResponse, StatusResponse,
};
use crate::application::services::{CreatePostDto, PostError, PostService, UpdatePostDto};
use crate::domain::{PageRequest, PostKind, PostOrder, PostSearch, PostStatus, StorageError};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

/// Map post service errors to HTTP errors.
pub(super) fn post_error(err: PostError) -> AppError {
    match err {
        PostError::UserNotFound => AppError::NotFound("User not found".into()),
        PostError::PostNotFound => AppError::NotFound("Post not found".into()),
        PostError::UserNotMatch => AppError::Forbidden("User does not match post owner".into()),
        PostError::StatusNotSupported(kind) => {
            AppError::BadRequest(format!("Posts of kind {} have no status", kind))
        }
        PostError::InvalidTag(msg) => AppError::Validation(msg),
        PostError::Storage(e) => match e {
            StorageError::TooLarge { .. } => AppError::PayloadTooLarge(e.to_string()),
            StorageError::UnsupportedType(_) | StorageError::InvalidKey(_) => {
                AppError::BadRequest(e.to_string())
            }
            StorageError::Io(_) => AppError::Internal(e.to_string()),
        },
        PostError::Repository(e) => e,
    }
}

/// Create a post
pub async fn create_post(
    State(state): State<AppState>,
    Extension(kind): Extension<PostKind>,
    form: PostForm,
) -> Result<(StatusCode, Json<PostResponse>), AppError> {
    form.validate().map_err(validation_error)?;
    let username = form
        .username
        .ok_or_else(|| AppError::Validation("username: Username is required".into()))?;

    let request = CreatePostDto {
        username,
        title: form.title,
        content: form.content,
        tags: form.tags,
        images: form.images,
    };

    let post = post_service(&state)
        .create_post(kind, request)
        .await
        .map_err(post_error)?;

    metrics::record_board_event(kind.as_str(), "created");

    Ok((StatusCode::CREATED, Json(post)))
}

/// List posts with search, tag/status filters and paging
pub async fn list_posts(
    State(state): State<AppState>,
    Extension(kind): Extension<PostKind>,
    Query(query): Query<PostListQuery>,
) -> Result<Json<PageResponse<PostResponse>>, AppError> {
    let status = query
        .status
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|s| {
            PostStatus::parse(kind, s)
                .ok_or_else(|| AppError::BadRequest(format!("Invalid status for {}: {}", kind, s)))
        })
        .transpose()?;

    let search = PostSearch {
        sentence: query.s.clone(),
        tags: query.tag_list(),
        status,
        order: query
            .order
            .as_deref()
            .map(PostOrder::from_str)
            .unwrap_or_default(),
    };
    let page = PageRequest::new(query.page, query.size);

    let posts = post_service(&state)
        .find_all(kind, search, page)
        .await
        .map_err(post_error)?;

    Ok(Json(posts))
}

/// Get a post with comments, tags and images
pub async fn get_post(
    State(state): State<AppState>,
    Extension(kind): Extension<PostKind>,
    Path(id): Path<String>,
) -> Result<Json<PostResponse>, AppError> {
    let id = parse_id(&id, "post")?;

    let post = post_service(&state)
        .find_post_by_id(kind, id)
        .await
        .map_err(post_error)?;

    metrics::record_board_event(kind.as_str(), "read");

    Ok(Json(post))
}

/// Update a post
pub async fn update_post(
    State(state): State<AppState>,
    Extension(kind): Extension<PostKind>,
    Path(id): Path<String>,
    form: PostForm,
) -> Result<Json<PostResponse>, AppError> {
    let id = parse_id(&id, "post")?;
    form.validate().map_err(validation_error)?;

    let request = UpdatePostDto {
        title: form.title,
        content: form.content,
        tags: form.tags,
        images: form.images,
    };

    let post = post_service(&state)
        .update_post(kind, id, request)
        .await
        .map_err(post_error)?;

    metrics::record_board_event(kind.as_str(), "updated");

    Ok(Json(post))
}

/// Delete a post
pub async fn delete_post(
    State(state): State<AppState>,
    Extension(kind): Extension<PostKind>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id, "post")?;

    post_service(&state)
        .delete_post(kind, id)
        .await
        .map_err(post_error)?;

    metrics::record_board_event(kind.as_str(), "deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Toggle a study or question status
pub async fn update_status(
    State(state): State<AppState>,
    Extension(kind): Extension<PostKind>,
    Path(id): Path<String>,
    Json(body): Json<UsernameRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let id = parse_id(&id, "post")?;
    body.validate().map_err(validation_error)?;

    let status = post_service(&state)
        .update_status(kind, id, &body.username)
        .await
        .map_err(post_error)?;

    metrics::record_board_event(kind.as_str(), "status_toggled");

    Ok(Json(status))
}

/// Three most viewed posts
pub async fn top_by_hits(
    State(state): State<AppState>,
    Extension(kind): Extension<PostKind>,
) -> Result<Json<Vec<PostResponse>>, AppError> {
    let posts = post_service(&state)
        .top3_by_hits(kind)
        .await
        .map_err(post_error)?;

    Ok(Json(posts))
}

/// Three most liked posts
pub async fn top_by_likes(
    State(state): State<AppState>,
    Extension(kind): Extension<PostKind>,
) -> Result<Json<Vec<PostResponse>>, AppError> {
    let posts = post_service(&state)
        .top3_by_likes(kind)
        .await
        .map_err(post_error)?;

    Ok(Json(posts))
}

/// Number of posts
pub async fn count_posts(
    State(state): State<AppState>,
    Extension(kind): Extension<PostKind>,
) -> Result<Json<CountResponse>, AppError> {
    let count = post_service(&state)
        .count_posts(kind)
        .await
        .map_err(post_error)?;

    Ok(Json(CountResponse { count }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_post_error_status_codes() {
        let cases = [
            (PostError::UserNotFound, StatusCode::NOT_FOUND),
            (PostError::PostNotFound, StatusCode::NOT_FOUND),
            (PostError::UserNotMatch, StatusCode::FORBIDDEN),
            (PostError::StatusNotSupported(PostKind::Chat), StatusCode::BAD_REQUEST),
            (PostError::InvalidTag("too long".into()), StatusCode::BAD_REQUEST),
            (
                PostError::Storage(StorageError::TooLarge { size: 2, max: 1 }),
                StatusCode::PAYLOAD_TOO_LARGE,
            ),
            (
                PostError::Repository(AppError::Internal("db".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(post_error(err).into_response().status(), expected);
        }
    }
}
