//! Comment entity and repository trait.
//!
//! Maps to the `comments` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A comment on a post.
///
/// Comments are threaded one level deep: a top-level comment opens a new
/// group (`group_num`), replies share their parent's group and record the
/// parent id. Deletion is soft so replies keep their anchor.
///
/// Maps to the `comments` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - post_id: BIGINT NOT NULL REFERENCES posts(id)
/// - user_id: BIGINT NOT NULL REFERENCES users(id)
/// - contents: TEXT NOT NULL
/// - parent: BIGINT NULL REFERENCES comments(id)
/// - group_num: BIGINT NOT NULL
/// - deleted: BOOLEAN NOT NULL DEFAULT FALSE
/// - created_at / last_modified_at: TIMESTAMPTZ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub contents: String,
    pub parent: Option<i64>,
    pub group_num: i64,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub last_modified_at: DateTime<Utc>,
}

impl Comment {
    pub fn is_reply(&self) -> bool {
        self.parent.is_some()
    }
}

impl Default for Comment {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            post_id: 0,
            user_id: 0,
            contents: String::new(),
            parent: None,
            group_num: 0,
            deleted: false,
            created_at: now,
            last_modified_at: now,
        }
    }
}

/// Data needed to insert a comment row.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: i64,
    pub user_id: i64,
    pub contents: String,
    pub parent: Option<i64>,
    pub group_num: i64,
}

/// A comment joined with its author's username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentView {
    pub comment: Comment,
    pub username: String,
}

/// Repository trait for Comment data access operations.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, AppError>;

    /// Comments of a post ordered by `(group_num, created_at)`.
    async fn find_by_post(&self, post_id: i64) -> Result<Vec<CommentView>, AppError>;

    /// Highest group number used on a post, 0 if it has no comments.
    async fn max_group_num(&self, post_id: i64) -> Result<i64, AppError>;

    async fn create(&self, comment: &NewComment) -> Result<Comment, AppError>;

    /// Overwrite the contents, bumping `last_modified_at`.
    async fn update_contents(&self, id: i64, contents: &str) -> Result<Comment, AppError>;

    /// Flag a comment as deleted.
    async fn soft_delete(&self, id: i64) -> Result<(), AppError>;
}
