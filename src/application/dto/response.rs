//! Response DTOs
//!
//! Data structures for API response bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{
    CommentView, Image, PostStatus, PostSummary, QuestionStatus, StudyStatus,
};

/// Post projection returned by every post endpoint.
///
/// Which fields are present depends on the endpoint: create returns title,
/// author, tags and image URLs; listings add counters; the detail view adds
/// comments. Absent fields are omitted from the JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hit: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub like: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments_size: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<CommentResponse>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Image URLs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub study_status: Option<StudyStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_status: Option<QuestionStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_at: Option<DateTime<Utc>>,
}

impl PostResponse {
    /// Listing row: counters, tags and status, no comments or images.
    pub fn summary(summary: &PostSummary) -> Self {
        let post = &summary.post;
        Self {
            id: Some(post.id),
            title: Some(post.title.clone()),
            content: Some(post.content.clone()),
            username: Some(summary.username.clone()),
            hit: Some(post.hit),
            like: Some(summary.likes),
            comments_size: Some(summary.comments),
            tags: Some(summary.tags.clone()),
            create_at: Some(post.created_at),
            last_modified_at: Some(post.last_modified_at),
            ..Default::default()
        }
        .with_status(post.status())
    }

    /// Ranking row for the top-3 widgets.
    pub fn ranking(summary: &PostSummary) -> Self {
        let post = &summary.post;
        Self {
            id: Some(post.id),
            title: Some(post.title.clone()),
            content: Some(post.content.clone()),
            username: Some(summary.username.clone()),
            hit: Some(post.hit),
            like: Some(summary.likes),
            tags: Some(summary.tags.clone()),
            ..Default::default()
        }
    }

    /// "My page" row: the author is implied, so no username.
    pub fn owned(summary: &PostSummary) -> Self {
        Self {
            username: None,
            ..Self::summary(summary)
        }
    }

    /// Full detail view.
    pub fn detail(
        summary: &PostSummary,
        hit: i64,
        comments: &[CommentView],
        images: &[Image],
    ) -> Self {
        Self {
            hit: Some(hit),
            comments: Some(comments.iter().map(CommentResponse::from).collect()),
            url: Some(images.iter().map(|image| image.path.clone()).collect()),
            ..Self::summary(summary)
        }
    }

    pub fn with_status(mut self, status: Option<PostStatus>) -> Self {
        match status {
            Some(PostStatus::Study(s)) => self.study_status = Some(s),
            Some(PostStatus::Question(q)) => self.question_status = Some(q),
            None => {}
        }
        self
    }
}

/// Comment as embedded in the post detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub comment_id: i64,
    pub username: String,
    pub contents: String,
    pub deleted: bool,
    pub group: i64,
    pub parent: Option<i64>,
    pub create_at: DateTime<Utc>,
    pub last_modified_at: DateTime<Utc>,
}

impl From<&CommentView> for CommentResponse {
    fn from(view: &CommentView) -> Self {
        let comment = &view.comment;
        Self {
            comment_id: comment.id,
            username: view.username.clone(),
            contents: comment.contents.clone(),
            deleted: comment.deleted,
            group: comment.group_num,
            parent: comment.parent,
            create_at: comment.created_at,
            last_modified_at: comment.last_modified_at,
        }
    }
}

impl From<CommentView> for CommentResponse {
    fn from(view: CommentView) -> Self {
        Self::from(&view)
    }
}

/// Result of a status toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub id: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub study_status: Option<StudyStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_status: Option<QuestionStatus>,
}

impl StatusResponse {
    pub fn new(id: i64, status: PostStatus) -> Self {
        let (study_status, question_status) = match status {
            PostStatus::Study(s) => (Some(s), None),
            PostStatus::Question(q) => (None, Some(q)),
        };
        Self {
            id,
            study_status,
            question_status,
        }
    }
}

/// Result of a like toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub post_id: i64,
    pub liked: bool,
    pub likes: i64,
}

/// Post count for a kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountResponse {
    pub count: i64,
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: i64,
    pub total_pages: i64,
}

impl<T> PageResponse<T> {
    pub fn new(content: Vec<T>, page: u32, size: u32, total_elements: i64) -> Self {
        let size_i = (size as i64).max(1);
        Self {
            content,
            page,
            size,
            total_elements,
            total_pages: (total_elements + size_i - 1) / size_i,
        }
    }
}
