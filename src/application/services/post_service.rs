//! Post Service
//!
//! Handles the post lifecycle for all three kinds: create, read (with hit
//! counting), update with tag and image replacement, status toggle, delete,
//! and the ranking/listing read models.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::application::dto::response::{PageResponse, PostResponse, StatusResponse};
use crate::application::services::tag_service::{TagError, TagService};
use crate::domain::services::TagSet;
use crate::domain::{
    CommentRepository, ImageRepository, ImageUploader, NewPost, PageRequest, PostKind,
    PostRepository, PostSearch, PostSummary, StorageError, TagRepository, UploadFile, User,
    UserRepository,
};
use crate::shared::error::AppError;

/// Number of posts in the ranking widgets.
pub const TOP_RANKING_SIZE: i64 = 3;

/// Post service trait
#[async_trait]
pub trait PostService: Send + Sync {
    /// Create a post authored by `request.username`
    async fn create_post(&self, kind: PostKind, request: CreatePostDto) -> Result<PostResponse, PostError>;

    /// Get a post with comments, tags and images. Counts as one hit.
    async fn find_post_by_id(&self, kind: PostKind, id: i64) -> Result<PostResponse, PostError>;

    /// Replace title, content, images and (if changed) tags
    async fn update_post(&self, kind: PostKind, id: i64, request: UpdatePostDto) -> Result<PostResponse, PostError>;

    /// Flip a study or question status. Owner only.
    async fn update_status(&self, kind: PostKind, id: i64, username: &str) -> Result<StatusResponse, PostError>;

    /// Delete a post and its stored images
    async fn delete_post(&self, kind: PostKind, id: i64) -> Result<(), PostError>;

    /// Search, filter and page through posts of a kind
    async fn find_all(
        &self,
        kind: PostKind,
        search: PostSearch,
        page: PageRequest,
    ) -> Result<PageResponse<PostResponse>, PostError>;

    /// Most viewed posts
    async fn top3_by_hits(&self, kind: PostKind) -> Result<Vec<PostResponse>, PostError>;

    /// Most liked posts
    async fn top3_by_likes(&self, kind: PostKind) -> Result<Vec<PostResponse>, PostError>;

    /// Number of posts of a kind
    async fn count_posts(&self, kind: PostKind) -> Result<i64, PostError>;

    /// Posts written by a user
    async fn find_all_by_user(&self, kind: PostKind, username: &str) -> Result<Vec<PostResponse>, PostError>;

    /// Posts liked by a user
    async fn find_all_liked_by_user(&self, kind: PostKind, username: &str) -> Result<Vec<PostResponse>, PostError>;
}

/// Create post request
#[derive(Debug, Clone, Default)]
pub struct CreatePostDto {
    pub username: String,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub images: Vec<UploadFile>,
}

/// Update post request
#[derive(Debug, Clone, Default)]
pub struct UpdatePostDto {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub images: Vec<UploadFile>,
}

/// Post service errors
#[derive(Debug, thiserror::Error)]
pub enum PostError {
    #[error("User not found")]
    UserNotFound,

    #[error("Post not found")]
    PostNotFound,

    #[error("User does not match post owner")]
    UserNotMatch,

    #[error("Posts of kind {0} have no status")]
    StatusNotSupported(PostKind),

    #[error("Invalid tag: {0}")]
    InvalidTag(String),

    #[error("Image storage error: {0}")]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Repository(#[from] AppError),
}

impl From<TagError> for PostError {
    fn from(err: TagError) -> Self {
        match err {
            TagError::TooLong { .. } => PostError::InvalidTag(err.to_string()),
            TagError::Repository(e) => PostError::Repository(e),
        }
    }
}

/// PostService implementation
pub struct PostServiceImpl<U, P, T, I, C, S>
where
    U: UserRepository,
    P: PostRepository,
    T: TagRepository,
    I: ImageRepository,
    C: CommentRepository,
    S: ImageUploader,
{
    user_repo: Arc<U>,
    post_repo: Arc<P>,
    tag_service: TagService<T>,
    image_repo: Arc<I>,
    comment_repo: Arc<C>,
    uploader: Arc<S>,
    image_prefix: String,
}

impl<U, P, T, I, C, S> PostServiceImpl<U, P, T, I, C, S>
where
    U: UserRepository,
    P: PostRepository,
    T: TagRepository,
    I: ImageRepository,
    C: CommentRepository,
    S: ImageUploader,
{
    pub fn new(
        user_repo: Arc<U>,
        post_repo: Arc<P>,
        tag_repo: Arc<T>,
        image_repo: Arc<I>,
        comment_repo: Arc<C>,
        uploader: Arc<S>,
        image_prefix: impl Into<String>,
    ) -> Self {
        Self {
            user_repo,
            post_repo,
            tag_service: TagService::new(tag_repo),
            image_repo,
            comment_repo,
            uploader,
            image_prefix: image_prefix.into(),
        }
    }

    async fn find_user(&self, username: &str) -> Result<User, PostError> {
        self.user_repo
            .find_by_username(username)
            .await?
            .ok_or(PostError::UserNotFound)
    }

    async fn find_post(&self, kind: PostKind, id: i64) -> Result<PostSummary, PostError> {
        self.post_repo
            .find_by_id(kind, id)
            .await?
            .ok_or(PostError::PostNotFound)
    }

    /// Upload each file and record it as an image of the post. Returns the URLs.
    async fn add_images(&self, post_id: i64, files: &[UploadFile]) -> Result<Vec<String>, PostError> {
        let mut urls = Vec::with_capacity(files.len());
        for file in files {
            let stored = self.uploader.upload(file, &self.image_prefix, post_id).await?;
            let image = self.image_repo.create(post_id, &stored).await?;
            debug!(post_id, image_id = image.id, url = %image.path, "Image stored");
            urls.push(image.path);
        }
        Ok(urls)
    }

    /// Remove every image of the post from storage and from the database.
    async fn delete_images(&self, post_id: i64) -> Result<usize, PostError> {
        let images = self.image_repo.find_by_post(post_id).await?;
        for image in &images {
            self.uploader.delete(&image.name).await?;
            self.image_repo.delete(image.id).await?;
        }
        Ok(images.len())
    }
}

#[async_trait]
impl<U, P, T, I, C, S> PostService for PostServiceImpl<U, P, T, I, C, S>
where
    U: UserRepository + 'static,
    P: PostRepository + 'static,
    T: TagRepository + 'static,
    I: ImageRepository + 'static,
    C: CommentRepository + 'static,
    S: ImageUploader + 'static,
{
    async fn create_post(&self, kind: PostKind, request: CreatePostDto) -> Result<PostResponse, PostError> {
        let user = self.find_user(&request.username).await?;
        let tags = self.tag_service.resolve(&request.tags).await?;
        let tag_ids: Vec<i64> = tags.iter().map(|t| t.id).collect();

        let new_post = NewPost {
            user_id: user.id,
            kind,
            title: request.title,
            content: request.content,
            status: kind.initial_status(),
        };
        let post = self.post_repo.create(&new_post, &tag_ids).await?;
        let urls = self.add_images(post.id, &request.images).await?;

        info!(post_id = post.id, kind = %kind, author = %user.username, tags = tag_ids.len(), images = urls.len(), "Post created");

        Ok(PostResponse {
            id: Some(post.id),
            title: Some(post.title.clone()),
            username: Some(user.username),
            url: Some(urls),
            tags: Some(tags.into_iter().map(|t| t.name).collect()),
            create_at: Some(post.created_at),
            ..Default::default()
        }
        .with_status(post.status()))
    }

    async fn find_post_by_id(&self, kind: PostKind, id: i64) -> Result<PostResponse, PostError> {
        let summary = self.find_post(kind, id).await?;
        let hit = self.post_repo.increment_hit(id).await?;
        let comments = self.comment_repo.find_by_post(id).await?;
        let images = self.image_repo.find_by_post(id).await?;

        debug!(post_id = id, kind = %kind, hit, likes = summary.likes, "Post read");

        Ok(PostResponse::detail(&summary, hit, &comments, &images))
    }

    async fn update_post(&self, kind: PostKind, id: i64, request: UpdatePostDto) -> Result<PostResponse, PostError> {
        let summary = self.find_post(kind, id).await?;

        // Tags are checked before any stored image is touched
        let tags_changed = !TagSet::is_same(&summary.tags, &request.tags);
        let new_tags = if tags_changed {
            Some(self.tag_service.resolve(&request.tags).await?)
        } else {
            None
        };

        let removed = self.delete_images(id).await?;
        let urls = self.add_images(id, &request.images).await?;

        if let Some(tags) = new_tags {
            let tag_ids: Vec<i64> = tags.iter().map(|t| t.id).collect();
            self.post_repo.replace_tags(id, &tag_ids).await?;
        }

        let post = self
            .post_repo
            .update_content(id, &request.title, &request.content)
            .await?;
        let tags = self.tag_service.tag_names_for_post(id).await?;

        info!(post_id = id, kind = %kind, images_removed = removed, images_added = urls.len(), tags_changed, "Post updated");

        Ok(PostResponse {
            id: Some(post.id),
            title: Some(post.title.clone()),
            content: Some(post.content.clone()),
            username: Some(summary.username),
            tags: Some(tags),
            url: Some(urls),
            last_modified_at: Some(post.last_modified_at),
            ..Default::default()
        }
        .with_status(post.status()))
    }

    async fn update_status(&self, kind: PostKind, id: i64, username: &str) -> Result<StatusResponse, PostError> {
        if !kind.has_status() {
            return Err(PostError::StatusNotSupported(kind));
        }

        let summary = self.find_post(kind, id).await?;
        if summary.username != username {
            return Err(PostError::UserNotMatch);
        }

        let current = summary
            .post
            .status()
            .ok_or(PostError::StatusNotSupported(kind))?;
        let next = current.toggled();
        self.post_repo.update_status(id, next).await?;

        info!(post_id = id, kind = %kind, from = current.as_str(), to = next.as_str(), "Post status toggled");

        Ok(StatusResponse::new(id, next))
    }

    async fn delete_post(&self, kind: PostKind, id: i64) -> Result<(), PostError> {
        self.find_post(kind, id).await?;

        let removed = self.delete_images(id).await?;
        self.post_repo.delete(id).await?;

        info!(post_id = id, kind = %kind, images_removed = removed, "Post deleted");

        Ok(())
    }

    async fn find_all(
        &self,
        kind: PostKind,
        search: PostSearch,
        page: PageRequest,
    ) -> Result<PageResponse<PostResponse>, PostError> {
        let search = PostSearch {
            tags: TagSet::normalize(&search.tags),
            status: search.status.filter(|s| s.kind() == kind),
            ..search
        };

        let (rows, total) = self.post_repo.search(kind, &search, page).await?;

        Ok(PageResponse::new(
            rows.iter().map(PostResponse::summary).collect(),
            page.page,
            page.size,
            total,
        ))
    }

    async fn top3_by_hits(&self, kind: PostKind) -> Result<Vec<PostResponse>, PostError> {
        let rows = self.post_repo.top_by_hits(kind, TOP_RANKING_SIZE).await?;
        Ok(rows.iter().map(PostResponse::ranking).collect())
    }

    async fn top3_by_likes(&self, kind: PostKind) -> Result<Vec<PostResponse>, PostError> {
        let rows = self.post_repo.top_by_likes(kind, TOP_RANKING_SIZE).await?;
        Ok(rows.iter().map(PostResponse::ranking).collect())
    }

    async fn count_posts(&self, kind: PostKind) -> Result<i64, PostError> {
        Ok(self.post_repo.count(kind).await?)
    }

    async fn find_all_by_user(&self, kind: PostKind, username: &str) -> Result<Vec<PostResponse>, PostError> {
        let user = self.find_user(username).await?;
        let rows = self.post_repo.find_by_user(kind, user.id).await?;
        Ok(rows.iter().map(PostResponse::owned).collect())
    }

    async fn find_all_liked_by_user(&self, kind: PostKind, username: &str) -> Result<Vec<PostResponse>, PostError> {
        let user = self.find_user(username).await?;
        let rows = self.post_repo.find_liked_by_user(kind, user.id).await?;
        Ok(rows.iter().map(PostResponse::summary).collect())
    }
}
