//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints, plus the per-request service
//! wiring they share.

pub mod health;
pub mod post;
pub mod comment;
pub mod like;
pub mod user;

use std::sync::Arc;

use crate::application::services::{
    CommentServiceImpl, LikeServiceImpl, PostServiceImpl,
};
use crate::infrastructure::repositories::{
    PgCommentRepository, PgImageRepository, PgLikeRepository, PgPostRepository,
    PgTagRepository, PgUserRepository,
};
use crate::infrastructure::storage::LocalImageUploader;
use crate::shared::error::AppError;
use crate::startup::AppState;

pub type PgPostService = PostServiceImpl<
    PgUserRepository,
    PgPostRepository,
    PgTagRepository,
    PgImageRepository,
    PgCommentRepository,
    LocalImageUploader,
>;

pub type PgCommentService =
    CommentServiceImpl<PgUserRepository, PgPostRepository, PgCommentRepository>;

pub type PgLikeService = LikeServiceImpl<PgUserRepository, PgPostRepository, PgLikeRepository>;

fn post_service(state: &AppState) -> PgPostService {
    PostServiceImpl::new(
        Arc::new(PgUserRepository::new(state.db.clone())),
        Arc::new(PgPostRepository::new(state.db.clone())),
        Arc::new(PgTagRepository::new(state.db.clone())),
        Arc::new(PgImageRepository::new(state.db.clone())),
        Arc::new(PgCommentRepository::new(state.db.clone())),
        state.uploader.clone(),
        state.settings.storage.image_prefix.clone(),
    )
}

fn comment_service(state: &AppState) -> PgCommentService {
    CommentServiceImpl::new(
        Arc::new(PgUserRepository::new(state.db.clone())),
        Arc::new(PgPostRepository::new(state.db.clone())),
        Arc::new(PgCommentRepository::new(state.db.clone())),
    )
}

fn like_service(state: &AppState) -> PgLikeService {
    LikeServiceImpl::new(
        Arc::new(PgUserRepository::new(state.db.clone())),
        Arc::new(PgPostRepository::new(state.db.clone())),
        Arc::new(PgLikeRepository::new(state.db.clone())),
    )
}

/// Parse a numeric path id.
fn parse_id(raw: &str, what: &str) -> Result<i64, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid {} ID", what)))
}
