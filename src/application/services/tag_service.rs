//! Tag Service
//!
//! Resolves client-supplied tag names to stored tags.

use std::sync::Arc;

use crate::domain::services::{TagSet, MAX_TAG_LENGTH};
use crate::domain::{Tag, TagRepository};
use crate::shared::error::AppError;

/// Tag service errors
#[derive(Debug, thiserror::Error)]
pub enum TagError {
    #[error("Tag name longer than {max} characters: {name}")]
    TooLong { name: String, max: usize },

    #[error(transparent)]
    Repository(#[from] AppError),
}

/// Tag lookups shared by the post service.
pub struct TagService<T>
where
    T: TagRepository,
{
    tag_repo: Arc<T>,
}

impl<T> TagService<T>
where
    T: TagRepository,
{
    pub fn new(tag_repo: Arc<T>) -> Self {
        Self { tag_repo }
    }

    /// Normalize raw names and find or create a tag for each distinct one.
    pub async fn resolve<S: AsRef<str>>(&self, raw: &[S]) -> Result<Vec<Tag>, TagError> {
        let names = TagSet::normalize(raw);
        if let Some(name) = TagSet::find_too_long(&names) {
            return Err(TagError::TooLong {
                name: name.to_string(),
                max: MAX_TAG_LENGTH,
            });
        }
        if names.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self.tag_repo.find_or_create(&names).await?)
    }

    /// Names of the tags currently attached to a post.
    pub async fn tag_names_for_post(&self, post_id: i64) -> Result<Vec<String>, TagError> {
        Ok(self.tag_repo.find_names_by_post(post_id).await?)
    }
}
