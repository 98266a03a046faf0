//! Comment Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use super::{comment_service, parse_id};
use crate::application::dto::request::{
    CreateCommentRequest, UpdateCommentRequest, UsernameRequest,
};
use crate::application::dto::response::CommentResponse;
use crate::application::services::{CommentError, CommentService, CreateCommentDto};
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

fn comment_error(err: CommentError) -> AppError {
    match err {
        CommentError::UserNotFound => AppError::NotFound("User not found".into()),
        CommentError::PostNotFound => AppError::NotFound("Post not found".into()),
        CommentError::CommentNotFound => AppError::NotFound("Comment not found".into()),
        CommentError::UserNotMatch => {
            AppError::Forbidden("User does not match comment author".into())
        }
        CommentError::Repository(e) => e,
    }
}

/// Comment on a post, or reply to a comment
pub async fn create_comment(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
    Json(body): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), AppError> {
    let post_id = parse_id(&post_id, "post")?;
    body.validate().map_err(validation_error)?;

    let request = CreateCommentDto {
        username: body.username,
        contents: body.contents,
        parent: body.parent,
    };

    let comment = comment_service(&state)
        .create_comment(post_id, request)
        .await
        .map_err(comment_error)?;

    Ok((StatusCode::CREATED, Json(comment)))
}

/// Edit a comment
pub async fn update_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
    Json(body): Json<UpdateCommentRequest>,
) -> Result<Json<CommentResponse>, AppError> {
    let comment_id = parse_id(&comment_id, "comment")?;
    body.validate().map_err(validation_error)?;

    let comment = comment_service(&state)
        .update_comment(comment_id, &body.username, &body.contents)
        .await
        .map_err(comment_error)?;

    Ok(Json(comment))
}

/// Soft-delete a comment
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
    Json(body): Json<UsernameRequest>,
) -> Result<StatusCode, AppError> {
    let comment_id = parse_id(&comment_id, "comment")?;
    body.validate().map_err(validation_error)?;

    comment_service(&state)
        .delete_comment(comment_id, &body.username)
        .await
        .map_err(comment_error)?;

    Ok(StatusCode::NO_CONTENT)
}
