//! Post entity, read models and repository trait.
//!
//! Maps to the `posts` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{PostKind, PostStatus, QuestionStatus, StudyStatus};
use crate::shared::error::AppError;

/// Represents a board post of any kind.
///
/// Maps to the `posts` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - user_id: BIGINT NOT NULL REFERENCES users(id)
/// - kind: VARCHAR(16) NOT NULL ('chat' | 'study' | 'question')
/// - title: VARCHAR(200) NOT NULL
/// - content: TEXT NOT NULL
/// - hit: BIGINT NOT NULL DEFAULT 0
/// - study_status: VARCHAR(16) NULL (set iff kind = 'study')
/// - question_status: VARCHAR(16) NULL (set iff kind = 'question')
/// - created_at / last_modified_at: TIMESTAMPTZ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,

    /// Author
    pub user_id: i64,

    pub kind: PostKind,

    pub title: String,

    pub content: String,

    /// View counter, bumped on every detail read
    pub hit: i64,

    pub study_status: Option<StudyStatus>,

    pub question_status: Option<QuestionStatus>,

    pub created_at: DateTime<Utc>,

    pub last_modified_at: DateTime<Utc>,
}

impl Post {
    /// Kind-tagged status, if this kind has one.
    pub fn status(&self) -> Option<PostStatus> {
        match self.kind {
            PostKind::Chat => None,
            PostKind::Study => self.study_status.map(PostStatus::Study),
            PostKind::Question => self.question_status.map(PostStatus::Question),
        }
    }

    /// Overwrite the status. Ignored if it belongs to another kind.
    pub fn set_status(&mut self, status: PostStatus) {
        match (self.kind, status) {
            (PostKind::Study, PostStatus::Study(s)) => self.study_status = Some(s),
            (PostKind::Question, PostStatus::Question(q)) => self.question_status = Some(q),
            _ => {}
        }
    }
}

impl Default for Post {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            user_id: 0,
            kind: PostKind::Chat,
            title: String::new(),
            content: String::new(),
            hit: 0,
            study_status: None,
            question_status: None,
            created_at: now,
            last_modified_at: now,
        }
    }
}

/// Data needed to insert a post row.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub user_id: i64,
    pub kind: PostKind,
    pub title: String,
    pub content: String,
    pub status: Option<PostStatus>,
}

/// A post joined with its author name, counters and tag names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSummary {
    pub post: Post,
    pub username: String,
    pub likes: i64,
    pub comments: i64,
    pub tags: Vec<String>,
}

/// Sort order for post listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostOrder {
    /// Newest first
    #[default]
    Latest,
    Hits,
    Likes,
    Comments,
}

impl PostOrder {
    /// Parse the `order` query value; unknown values fall back to latest.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "hit" | "hits" => Self::Hits,
            "like" | "likes" => Self::Likes,
            "comment" | "comments" => Self::Comments,
            _ => Self::Latest,
        }
    }
}

/// Listing filter: keyword, tags, status and ordering.
#[derive(Debug, Clone, Default)]
pub struct PostSearch {
    /// Matched case-insensitively against title and content
    pub sentence: Option<String>,

    /// Normalized tag names; a post matches if it has any of them
    pub tags: Vec<String>,

    pub status: Option<PostStatus>,

    pub order: PostOrder,
}

/// Offset window over a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub const DEFAULT_SIZE: u32 = 10;
    pub const MAX_SIZE: u32 = 100;

    /// Build a page request, clamping the size to `1..=MAX_SIZE`.
    pub fn new(page: Option<u32>, size: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(0),
            size: size.unwrap_or(Self::DEFAULT_SIZE).clamp(1, Self::MAX_SIZE),
        }
    }

    pub fn offset(&self) -> i64 {
        self.page as i64 * self.size as i64
    }

    pub fn limit(&self) -> i64 {
        self.size as i64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Repository trait for Post data access operations.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find a post of the given kind, joined with author and counters.
    async fn find_by_id(&self, kind: PostKind, id: i64) -> Result<Option<PostSummary>, AppError>;

    /// Whether a post with this id exists, whatever its kind.
    async fn exists(&self, id: i64) -> Result<bool, AppError>;

    /// Insert a post together with one `post_tags` row per tag id, atomically.
    async fn create(&self, post: &NewPost, tag_ids: &[i64]) -> Result<Post, AppError>;

    /// Overwrite title and content, bumping `last_modified_at`.
    async fn update_content(&self, id: i64, title: &str, content: &str) -> Result<Post, AppError>;

    /// Add one to the hit counter and return the new value.
    async fn increment_hit(&self, id: i64) -> Result<i64, AppError>;

    /// Persist a status change.
    async fn update_status(&self, id: i64, status: PostStatus) -> Result<(), AppError>;

    /// Delete every `post_tags` row of the post and insert the given tags, atomically.
    async fn replace_tags(&self, id: i64, tag_ids: &[i64]) -> Result<(), AppError>;

    /// Delete a post row. Tags, comments and likes cascade.
    async fn delete(&self, id: i64) -> Result<(), AppError>;

    /// Filtered, ordered page of posts plus the total match count.
    async fn search(
        &self,
        kind: PostKind,
        search: &PostSearch,
        page: PageRequest,
    ) -> Result<(Vec<PostSummary>, i64), AppError>;

    /// Most viewed posts of a kind.
    async fn top_by_hits(&self, kind: PostKind, limit: i64) -> Result<Vec<PostSummary>, AppError>;

    /// Most liked posts of a kind.
    async fn top_by_likes(&self, kind: PostKind, limit: i64) -> Result<Vec<PostSummary>, AppError>;

    /// Number of posts of a kind.
    async fn count(&self, kind: PostKind) -> Result<i64, AppError>;

    /// Posts of a kind written by a user, newest first.
    async fn find_by_user(&self, kind: PostKind, user_id: i64) -> Result<Vec<PostSummary>, AppError>;

    /// Posts of a kind liked by a user, most recently liked first.
    async fn find_liked_by_user(
        &self,
        kind: PostKind,
        user_id: i64,
    ) -> Result<Vec<PostSummary>, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_status_reads_kind_column() {
        let study = Post {
            kind: PostKind::Study,
            study_status: Some(StudyStatus::Closed),
            ..Default::default()
        };
        assert_eq!(study.status(), Some(PostStatus::Study(StudyStatus::Closed)));

        let chat = Post::default();
        assert_eq!(chat.status(), None);
    }

    #[test]
    fn test_set_status_ignores_foreign_kind() {
        let mut question = Post {
            kind: PostKind::Question,
            question_status: Some(QuestionStatus::Unsolved),
            ..Default::default()
        };

        question.set_status(PostStatus::Study(StudyStatus::Closed));
        assert_eq!(question.study_status, None);
        assert_eq!(question.question_status, Some(QuestionStatus::Unsolved));

        question.set_status(PostStatus::Question(QuestionStatus::Solved));
        assert_eq!(question.question_status, Some(QuestionStatus::Solved));
    }

    #[test_case("hits", PostOrder::Hits)]
    #[test_case("LIKES", PostOrder::Likes)]
    #[test_case("comments", PostOrder::Comments)]
    #[test_case("latest", PostOrder::Latest)]
    #[test_case("whatever", PostOrder::Latest)]
    fn test_post_order_from_str(input: &str, expected: PostOrder) {
        assert_eq!(PostOrder::from_str(input), expected);
    }

    #[test]
    fn test_page_request_clamps_size() {
        assert_eq!(PageRequest::new(None, None).size, PageRequest::DEFAULT_SIZE);
        assert_eq!(PageRequest::new(None, Some(0)).size, 1);
        assert_eq!(PageRequest::new(None, Some(1000)).size, PageRequest::MAX_SIZE);
    }

    #[test]
    fn test_page_request_offset() {
        let page = PageRequest::new(Some(3), Some(20));
        assert_eq!(page.offset(), 60);
        assert_eq!(page.limit(), 20);
    }
}
