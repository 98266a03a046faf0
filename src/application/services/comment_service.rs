//! Comment Service
//!
//! Handles threaded comments: create (top-level or reply), edit, soft delete.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::application::dto::response::CommentResponse;
use crate::domain::{
    Comment, CommentRepository, CommentView, NewComment, PostRepository, User, UserRepository,
};
use crate::shared::error::AppError;

/// Comment service trait
#[async_trait]
pub trait CommentService: Send + Sync {
    /// Add a comment to a post, or a reply when `request.parent` is set
    async fn create_comment(&self, post_id: i64, request: CreateCommentDto) -> Result<CommentResponse, CommentError>;

    /// Edit a comment. Author only.
    async fn update_comment(&self, comment_id: i64, username: &str, contents: &str) -> Result<CommentResponse, CommentError>;

    /// Soft-delete a comment. Author only.
    async fn delete_comment(&self, comment_id: i64, username: &str) -> Result<(), CommentError>;
}

/// Create comment request
#[derive(Debug, Clone)]
pub struct CreateCommentDto {
    pub username: String,
    pub contents: String,
    pub parent: Option<i64>,
}

/// Comment service errors
#[derive(Debug, thiserror::Error)]
pub enum CommentError {
    #[error("User not found")]
    UserNotFound,

    #[error("Post not found")]
    PostNotFound,

    #[error("Comment not found")]
    CommentNotFound,

    #[error("User does not match comment author")]
    UserNotMatch,

    #[error(transparent)]
    Repository(#[from] AppError),
}

/// CommentService implementation
pub struct CommentServiceImpl<U, P, C>
where
    U: UserRepository,
    P: PostRepository,
    C: CommentRepository,
{
    user_repo: Arc<U>,
    post_repo: Arc<P>,
    comment_repo: Arc<C>,
}

impl<U, P, C> CommentServiceImpl<U, P, C>
where
    U: UserRepository,
    P: PostRepository,
    C: CommentRepository,
{
    pub fn new(user_repo: Arc<U>, post_repo: Arc<P>, comment_repo: Arc<C>) -> Self {
        Self {
            user_repo,
            post_repo,
            comment_repo,
        }
    }

    async fn find_user(&self, username: &str) -> Result<User, CommentError> {
        self.user_repo
            .find_by_username(username)
            .await?
            .ok_or(CommentError::UserNotFound)
    }

    /// Load a live comment and check that `user` wrote it.
    async fn find_own_comment(&self, comment_id: i64, user: &User) -> Result<Comment, CommentError> {
        let comment = self
            .comment_repo
            .find_by_id(comment_id)
            .await?
            .filter(|c| !c.deleted)
            .ok_or(CommentError::CommentNotFound)?;

        if comment.user_id != user.id {
            return Err(CommentError::UserNotMatch);
        }
        Ok(comment)
    }
}

#[async_trait]
impl<U, P, C> CommentService for CommentServiceImpl<U, P, C>
where
    U: UserRepository + 'static,
    P: PostRepository + 'static,
    C: CommentRepository + 'static,
{
    async fn create_comment(&self, post_id: i64, request: CreateCommentDto) -> Result<CommentResponse, CommentError> {
        let user = self.find_user(&request.username).await?;
        if !self.post_repo.exists(post_id).await? {
            return Err(CommentError::PostNotFound);
        }

        // Replies join their parent's group; top-level comments open a new one.
        let group_num = match request.parent {
            Some(parent_id) => {
                self.comment_repo
                    .find_by_id(parent_id)
                    .await?
                    .filter(|parent| parent.post_id == post_id)
                    .ok_or(CommentError::CommentNotFound)?
                    .group_num
            }
            None => self.comment_repo.max_group_num(post_id).await? + 1,
        };

        let comment = self
            .comment_repo
            .create(&NewComment {
                post_id,
                user_id: user.id,
                contents: request.contents,
                parent: request.parent,
                group_num,
            })
            .await?;

        info!(comment_id = comment.id, post_id, group = group_num, reply = comment.is_reply(), "Comment created");

        Ok(CommentView {
            comment,
            username: user.username,
        }
        .into())
    }

    async fn update_comment(&self, comment_id: i64, username: &str, contents: &str) -> Result<CommentResponse, CommentError> {
        let user = self.find_user(username).await?;
        self.find_own_comment(comment_id, &user).await?;

        let comment = self.comment_repo.update_contents(comment_id, contents).await?;

        info!(comment_id, "Comment updated");

        Ok(CommentView {
            comment,
            username: user.username,
        }
        .into())
    }

    async fn delete_comment(&self, comment_id: i64, username: &str) -> Result<(), CommentError> {
        let user = self.find_user(username).await?;
        self.find_own_comment(comment_id, &user).await?;

        self.comment_repo.soft_delete(comment_id).await?;

        info!(comment_id, "Comment deleted");

        Ok(())
    }
}
