//! Tag and PostTag entities and repository trait.
//!
//! Maps to the `tags` and `post_tags` tables in the database schema.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A tag name shared between posts.
///
/// Maps to the `tags` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - name: VARCHAR(64) NOT NULL UNIQUE (stored uppercase)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

/// Join row linking a post to a tag.
///
/// Maps to the `post_tags` table, unique on `(post_id, tag_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostTag {
    pub id: i64,
    pub post_id: i64,
    pub tag_id: i64,
}

/// Repository trait for Tag data access operations.
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Return the tags with the given names, creating missing ones.
    ///
    /// The result follows the order of `names`.
    async fn find_or_create(&self, names: &[String]) -> Result<Vec<Tag>, AppError>;

    /// Names of the tags attached to a post, in attachment order.
    async fn find_names_by_post(&self, post_id: i64) -> Result<Vec<String>, AppError>;
}
