//! Like entity and repository trait.
//!
//! Maps to the `likes` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A user's like on a post.
///
/// Maps to the `likes` table, unique on `(post_id, user_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Repository trait for Like data access operations.
#[async_trait]
pub trait LikeRepository: Send + Sync {
    async fn find(&self, post_id: i64, user_id: i64) -> Result<Option<Like>, AppError>;

    async fn create(&self, post_id: i64, user_id: i64) -> Result<Like, AppError>;

    async fn delete(&self, id: i64) -> Result<(), AppError>;

    async fn count_by_post(&self, post_id: i64) -> Result<i64, AppError>;
}
