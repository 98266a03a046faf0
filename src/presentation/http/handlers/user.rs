//! User Handlers
//!
//! "My page" listings: a user's own posts and the posts they liked.

use axum::{
    extract::{Path, State},
    Json,
};

use super::post::post_error;
use super::post_service;
use crate::application::dto::response::PostResponse;
use crate::application::services::PostService;
use crate::domain::PostKind;
use crate::shared::error::AppError;
use crate::startup::AppState;

fn parse_collection(collection: &str) -> Result<PostKind, AppError> {
    PostKind::from_collection(collection)
        .ok_or_else(|| AppError::NotFound(format!("Unknown post collection: {}", collection)))
}

/// Posts written by a user
pub async fn get_user_posts(
    State(state): State<AppState>,
    Path((username, collection)): Path<(String, String)>,
) -> Result<Json<Vec<PostResponse>>, AppError> {
    let kind = parse_collection(&collection)?;

    let posts = post_service(&state)
        .find_all_by_user(kind, &username)
        .await
        .map_err(post_error)?;

    Ok(Json(posts))
}

/// Posts liked by a user
pub async fn get_user_liked_posts(
    State(state): State<AppState>,
    Path((username, collection)): Path<(String, String)>,
) -> Result<Json<Vec<PostResponse>>, AppError> {
    let kind = parse_collection(&collection)?;

    let posts = post_service(&state)
        .find_all_liked_by_user(kind, &username)
        .await
        .map_err(post_error)?;

    Ok(Json(posts))
}
