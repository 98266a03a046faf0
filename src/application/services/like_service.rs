//! Like Service
//!
//! Toggles a user's like on a post.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::application::dto::response::LikeResponse;
use crate::domain::{LikeRepository, PostKind, PostRepository, UserRepository};
use crate::shared::error::AppError;

/// Like service trait
#[async_trait]
pub trait LikeService: Send + Sync {
    /// Like the post if the user has not yet, otherwise remove the like.
    /// The post must be of `kind`.
    async fn toggle_like(&self, kind: PostKind, post_id: i64, username: &str) -> Result<LikeResponse, LikeError>;
}

/// Like service errors
#[derive(Debug, thiserror::Error)]
pub enum LikeError {
    #[error("User not found")]
    UserNotFound,

    #[error("Post not found")]
    PostNotFound,

    #[error(transparent)]
    Repository(#[from] AppError),
}

/// LikeService implementation
pub struct LikeServiceImpl<U, P, L>
where
    U: UserRepository,
    P: PostRepository,
    L: LikeRepository,
{
    user_repo: Arc<U>,
    post_repo: Arc<P>,
    like_repo: Arc<L>,
}

impl<U, P, L> LikeServiceImpl<U, P, L>
where
    U: UserRepository,
    P: PostRepository,
    L: LikeRepository,
{
    pub fn new(user_repo: Arc<U>, post_repo: Arc<P>, like_repo: Arc<L>) -> Self {
        Self {
            user_repo,
            post_repo,
            like_repo,
        }
    }
}

#[async_trait]
impl<U, P, L> LikeService for LikeServiceImpl<U, P, L>
where
    U: UserRepository + 'static,
    P: PostRepository + 'static,
    L: LikeRepository + 'static,
{
    async fn toggle_like(&self, kind: PostKind, post_id: i64, username: &str) -> Result<LikeResponse, LikeError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or(LikeError::UserNotFound)?;
        self.post_repo
            .find_by_id(kind, post_id)
            .await?
            .ok_or(LikeError::PostNotFound)?;

        let liked = match self.like_repo.find(post_id, user.id).await? {
            Some(like) => {
                self.like_repo.delete(like.id).await?;
                false
            }
            None => {
                self.like_repo.create(post_id, user.id).await?;
                true
            }
        };
        let likes = self.like_repo.count_by_post(post_id).await?;

        debug!(post_id, kind = %kind, user_id = user.id, liked, likes, "Like toggled");

        Ok(LikeResponse {
            post_id,
            liked,
            likes,
        })
    }
}
