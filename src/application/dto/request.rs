//! Request DTOs
//!
//! Data structures for API request bodies and query strings.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::UploadFile;

/// Create/update post form, read from a multipart body.
///
/// `tags` and `images` may repeat. `username` is required on create and
/// ignored on update.
#[derive(Debug, Clone, Default, Validate)]
pub struct PostForm {
    #[validate(length(min = 1, max = 64, message = "Username must be 1-64 characters"))]
    pub username: Option<String>,

    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 20000, message = "Content must be 1-20000 characters"))]
    pub content: String,

    #[validate(length(max = 20, message = "At most 20 tags per post"))]
    pub tags: Vec<String>,

    #[validate(custom(function = "validate_image_count"))]
    pub images: Vec<UploadFile>,
}

/// Most images one post may carry.
pub const MAX_IMAGES_PER_POST: usize = 10;

fn validate_image_count(images: &[UploadFile]) -> Result<(), ValidationError> {
    if images.len() > MAX_IMAGES_PER_POST {
        return Err(ValidationError::new("too_many_images")
            .with_message("At most 10 images per post".into()));
    }
    Ok(())
}

/// Body naming the acting user (status toggle, like toggle, comment delete).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UsernameRequest {
    #[validate(length(min = 1, max = 64, message = "Username must be 1-64 characters"))]
    pub username: String,
}

/// Create comment request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 64, message = "Username must be 1-64 characters"))]
    pub username: String,

    #[validate(length(min = 1, max = 2000, message = "Comment must be 1-2000 characters"))]
    pub contents: String,

    /// Comment being replied to
    pub parent: Option<i64>,
}

/// Update comment request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, max = 64, message = "Username must be 1-64 characters"))]
    pub username: String,

    #[validate(length(min = 1, max = 2000, message = "Comment must be 1-2000 characters"))]
    pub contents: String,
}

/// Post listing query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostListQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,

    /// `latest` (default), `hits`, `likes` or `comments`
    pub order: Option<String>,

    /// Keyword searched in title and content
    pub s: Option<String>,

    /// Comma-separated tag names
    pub tags: Option<String>,

    /// `ACTIVE`/`CLOSED` for studies, `UNSOLVED`/`SOLVED` for questions
    pub status: Option<String>,
}

impl PostListQuery {
    /// Split the comma-separated `tags` parameter.
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .map(|tags| tags.split(',').map(str::to_string).collect())
            .unwrap_or_default()
    }
}
