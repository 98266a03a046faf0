//! Like Handlers

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use validator::Validate;

use super::{like_service, parse_id};
use crate::application::dto::request::UsernameRequest;
use crate::application::dto::response::LikeResponse;
use crate::application::services::{LikeError, LikeService};
use crate::domain::PostKind;
use crate::infrastructure::metrics;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

/// Like or unlike a post
pub async fn toggle_like(
    State(state): State<AppState>,
    Extension(kind): Extension<PostKind>,
    Path(id): Path<String>,
    Json(body): Json<UsernameRequest>,
) -> Result<Json<LikeResponse>, AppError> {
    let post_id = parse_id(&id, "post")?;
    body.validate().map_err(validation_error)?;

    let like = like_service(&state)
        .toggle_like(kind, post_id, &body.username)
        .await
        .map_err(|e| match e {
            LikeError::UserNotFound => AppError::NotFound("User not found".into()),
            LikeError::PostNotFound => AppError::NotFound("Post not found".into()),
            LikeError::Repository(e) => e,
        })?;

    metrics::record_board_event(kind.as_str(), if like.liked { "liked" } else { "unliked" });

    Ok(Json(like))
}
