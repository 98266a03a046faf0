//! Image entity, repository trait and object-storage uploader trait.
//!
//! Maps to the `images` table in the database schema.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// An image attached to a post.
///
/// Maps to the `images` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - post_id: BIGINT NOT NULL REFERENCES posts(id)
/// - name: VARCHAR(512) NOT NULL (object key in storage)
/// - path: TEXT NOT NULL (public URL)
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub id: i64,

    /// Owning post
    pub post_id: i64,

    /// Object key the uploader stored the file under
    pub name: String,

    /// URL clients fetch the image from
    pub path: String,

    pub created_at: DateTime<Utc>,
}

/// A file received from a client, not yet stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadFile {
    /// Client-supplied file name
    pub filename: String,

    pub content_type: Option<String>,

    pub data: Bytes,
}

impl UploadFile {
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Where the uploader put a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Object key, later passed back to [`ImageUploader::delete`]
    pub name: String,

    /// Public URL
    pub url: String,
}

/// Object storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    #[error("Not an image: {0}")]
    UnsupportedType(String),

    #[error("File too large: {size} bytes (max {max})")]
    TooLarge { size: usize, max: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Object-storage uploader for post images.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageUploader: Send + Sync {
    /// Store a file under `prefix` on behalf of `post_id` and return its key and URL.
    async fn upload(
        &self,
        file: &UploadFile,
        prefix: &str,
        post_id: i64,
    ) -> Result<StoredObject, StorageError>;

    /// Remove a stored object by key. Missing objects are not an error.
    async fn delete(&self, name: &str) -> Result<(), StorageError>;
}

/// Repository trait for Image data access operations.
#[async_trait]
pub trait ImageRepository: Send + Sync {
    /// Images of a post, oldest first.
    async fn find_by_post(&self, post_id: i64) -> Result<Vec<Image>, AppError>;

    /// Record a stored object as an image of the post.
    async fn create(&self, post_id: i64, stored: &StoredObject) -> Result<Image, AppError>;

    /// Delete an image row by ID.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
