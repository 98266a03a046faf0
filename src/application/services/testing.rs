//! In-memory repositories for service tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;

use crate::domain::{
    Comment, CommentRepository, CommentView, Image, ImageRepository, Like, LikeRepository,
    NewComment, NewPost, PageRequest, Post, PostKind, PostOrder, PostRepository, PostSearch,
    PostStatus, PostSummary, PostTag, StoredObject, Tag, TagRepository, User, UserRepository,
};
use crate::shared::error::AppError;

#[derive(Default)]
struct BoardState {
    next_id: i64,
    users: Vec<User>,
    posts: Vec<Post>,
    tags: Vec<Tag>,
    post_tags: Vec<PostTag>,
    images: Vec<Image>,
    comments: Vec<Comment>,
    likes: Vec<Like>,
}

impl BoardState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn summarize(&self, post: &Post) -> PostSummary {
        let username = self
            .users
            .iter()
            .find(|u| u.id == post.user_id)
            .map(|u| u.username.clone())
            .unwrap_or_default();
        PostSummary {
            post: post.clone(),
            username,
            likes: self.likes.iter().filter(|l| l.post_id == post.id).count() as i64,
            comments: self
                .comments
                .iter()
                .filter(|c| c.post_id == post.id && !c.deleted)
                .count() as i64,
            tags: self.tag_names(post.id),
        }
    }

    fn tag_names(&self, post_id: i64) -> Vec<String> {
        self.post_tags
            .iter()
            .filter(|pt| pt.post_id == post_id)
            .filter_map(|pt| self.tags.iter().find(|t| t.id == pt.tag_id))
            .map(|t| t.name.clone())
            .collect()
    }

    fn attach_tags(&mut self, post_id: i64, tag_ids: &[i64]) {
        for &tag_id in tag_ids {
            let id = self.next_id();
            self.post_tags.push(PostTag { id, post_id, tag_id });
        }
    }

    fn post_mut(&mut self, id: i64) -> Result<&mut Post, AppError> {
        self.posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound(format!("post {}", id)))
    }

    fn summaries<'a>(&self, posts: impl Iterator<Item = &'a Post>) -> Vec<PostSummary> {
        posts.map(|p| self.summarize(p)).collect()
    }
}

/// Every repository trait over one shared in-memory store.
#[derive(Clone, Default)]
pub struct InMemoryBoard {
    state: Arc<Mutex<BoardState>>,
}

impl InMemoryBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, username: &str) -> User {
        let mut state = self.state.lock();
        let user = User {
            id: state.next_id(),
            username: username.to_string(),
            email: format!("{}@example.com", username),
            created_at: Utc::now(),
        };
        state.users.push(user.clone());
        user
    }

    pub fn add_comment(
        &self,
        post_id: i64,
        user_id: i64,
        contents: &str,
        parent: Option<i64>,
        group_num: i64,
    ) -> Comment {
        let mut state = self.state.lock();
        let comment = Comment {
            id: state.next_id(),
            post_id,
            user_id,
            contents: contents.to_string(),
            parent,
            group_num,
            ..Default::default()
        };
        state.comments.push(comment.clone());
        comment
    }

    pub fn add_like(&self, post_id: i64, user_id: i64) {
        let mut state = self.state.lock();
        let id = state.next_id();
        state.likes.push(Like {
            id,
            post_id,
            user_id,
            created_at: Utc::now(),
        });
    }

    pub fn post(&self, id: i64) -> Option<Post> {
        self.state.lock().posts.iter().find(|p| p.id == id).cloned()
    }

    pub fn comment(&self, id: i64) -> Option<Comment> {
        self.state.lock().comments.iter().find(|c| c.id == id).cloned()
    }

    pub fn post_tags(&self, post_id: i64) -> Vec<PostTag> {
        self.state
            .lock()
            .post_tags
            .iter()
            .filter(|pt| pt.post_id == post_id)
            .cloned()
            .collect()
    }

    pub fn post_tag_count(&self, post_id: i64) -> usize {
        self.post_tags(post_id).len()
    }

    pub fn tag_count(&self) -> usize {
        self.state.lock().tags.len()
    }

    pub fn image_count(&self, post_id: i64) -> usize {
        self.state
            .lock()
            .images
            .iter()
            .filter(|i| i.post_id == post_id)
            .count()
    }

    pub fn like_count(&self, post_id: i64) -> usize {
        self.state
            .lock()
            .likes
            .iter()
            .filter(|l| l.post_id == post_id)
            .count()
    }
}

#[async_trait]
impl UserRepository for InMemoryBoard {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.state.lock().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .state
            .lock()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }
}

#[async_trait]
impl PostRepository for InMemoryBoard {
    async fn find_by_id(&self, kind: PostKind, id: i64) -> Result<Option<PostSummary>, AppError> {
        let state = self.state.lock();
        Ok(state
            .posts
            .iter()
            .find(|p| p.id == id && p.kind == kind)
            .map(|p| state.summarize(p)))
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.post(id).is_some())
    }

    async fn create(&self, new_post: &NewPost, tag_ids: &[i64]) -> Result<Post, AppError> {
        let mut state = self.state.lock();
        let mut post = Post {
            id: state.next_id(),
            user_id: new_post.user_id,
            kind: new_post.kind,
            title: new_post.title.clone(),
            content: new_post.content.clone(),
            ..Default::default()
        };
        if let Some(status) = new_post.status {
            post.set_status(status);
        }
        state.posts.push(post.clone());
        state.attach_tags(post.id, tag_ids);
        Ok(post)
    }

    async fn update_content(&self, id: i64, title: &str, content: &str) -> Result<Post, AppError> {
        let mut state = self.state.lock();
        let post = state.post_mut(id)?;
        post.title = title.to_string();
        post.content = content.to_string();
        post.last_modified_at = Utc::now();
        Ok(post.clone())
    }

    async fn increment_hit(&self, id: i64) -> Result<i64, AppError> {
        let mut state = self.state.lock();
        let post = state.post_mut(id)?;
        post.hit += 1;
        Ok(post.hit)
    }

    async fn update_status(&self, id: i64, status: PostStatus) -> Result<(), AppError> {
        let mut state = self.state.lock();
        state.post_mut(id)?.set_status(status);
        Ok(())
    }

    async fn replace_tags(&self, id: i64, tag_ids: &[i64]) -> Result<(), AppError> {
        let mut state = self.state.lock();
        state.post_tags.retain(|pt| pt.post_id != id);
        state.attach_tags(id, tag_ids);
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut state = self.state.lock();
        state.posts.retain(|p| p.id != id);
        state.post_tags.retain(|pt| pt.post_id != id);
        state.images.retain(|i| i.post_id != id);
        state.comments.retain(|c| c.post_id != id);
        state.likes.retain(|l| l.post_id != id);
        Ok(())
    }

    async fn search(
        &self,
        kind: PostKind,
        search: &PostSearch,
        page: PageRequest,
    ) -> Result<(Vec<PostSummary>, i64), AppError> {
        let state = self.state.lock();
        let sentence = search.sentence.as_ref().map(|s| s.to_lowercase());

        let mut rows: Vec<PostSummary> = state
            .posts
            .iter()
            .filter(|p| p.kind == kind)
            .filter(|p| match &sentence {
                Some(s) => {
                    p.title.to_lowercase().contains(s) || p.content.to_lowercase().contains(s)
                }
                None => true,
            })
            .filter(|p| search.status.map_or(true, |s| p.status() == Some(s)))
            .map(|p| state.summarize(p))
            .filter(|s| search.tags.is_empty() || s.tags.iter().any(|t| search.tags.contains(t)))
            .collect();

        match search.order {
            PostOrder::Latest => rows.sort_by(|a, b| b.post.id.cmp(&a.post.id)),
            PostOrder::Hits => rows.sort_by(|a, b| b.post.hit.cmp(&a.post.hit)),
            PostOrder::Likes => rows.sort_by(|a, b| b.likes.cmp(&a.likes)),
            PostOrder::Comments => rows.sort_by(|a, b| b.comments.cmp(&a.comments)),
        }

        let total = rows.len() as i64;
        let rows = rows
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok((rows, total))
    }

    async fn top_by_hits(&self, kind: PostKind, limit: i64) -> Result<Vec<PostSummary>, AppError> {
        let state = self.state.lock();
        let mut rows = state.summaries(state.posts.iter().filter(|p| p.kind == kind));
        rows.sort_by(|a, b| b.post.hit.cmp(&a.post.hit).then(b.post.id.cmp(&a.post.id)));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn top_by_likes(&self, kind: PostKind, limit: i64) -> Result<Vec<PostSummary>, AppError> {
        let state = self.state.lock();
        let mut rows = state.summaries(state.posts.iter().filter(|p| p.kind == kind));
        rows.sort_by(|a, b| b.likes.cmp(&a.likes).then(b.post.id.cmp(&a.post.id)));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn count(&self, kind: PostKind) -> Result<i64, AppError> {
        Ok(self.state.lock().posts.iter().filter(|p| p.kind == kind).count() as i64)
    }

    async fn find_by_user(&self, kind: PostKind, user_id: i64) -> Result<Vec<PostSummary>, AppError> {
        let state = self.state.lock();
        let mut rows = state.summaries(
            state
                .posts
                .iter()
                .filter(|p| p.kind == kind && p.user_id == user_id),
        );
        rows.sort_by(|a, b| b.post.id.cmp(&a.post.id));
        Ok(rows)
    }

    async fn find_liked_by_user(
        &self,
        kind: PostKind,
        user_id: i64,
    ) -> Result<Vec<PostSummary>, AppError> {
        let state = self.state.lock();
        let mut likes: Vec<&Like> = state.likes.iter().filter(|l| l.user_id == user_id).collect();
        likes.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(state.summaries(likes.iter().filter_map(|like| {
            state
                .posts
                .iter()
                .find(|p| p.id == like.post_id && p.kind == kind)
        })))
    }
}

#[async_trait]
impl TagRepository for InMemoryBoard {
    async fn find_or_create(&self, names: &[String]) -> Result<Vec<Tag>, AppError> {
        let mut state = self.state.lock();
        let mut tags = Vec::with_capacity(names.len());
        for name in names {
            let existing = state.tags.iter().find(|t| &t.name == name).cloned();
            let tag = match existing {
                Some(tag) => tag,
                None => {
                    let tag = Tag {
                        id: state.next_id(),
                        name: name.clone(),
                    };
                    state.tags.push(tag.clone());
                    tag
                }
            };
            tags.push(tag);
        }
        Ok(tags)
    }

    async fn find_names_by_post(&self, post_id: i64) -> Result<Vec<String>, AppError> {
        Ok(self.state.lock().tag_names(post_id))
    }
}

#[async_trait]
impl ImageRepository for InMemoryBoard {
    async fn find_by_post(&self, post_id: i64) -> Result<Vec<Image>, AppError> {
        Ok(self
            .state
            .lock()
            .images
            .iter()
            .filter(|i| i.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn create(&self, post_id: i64, stored: &StoredObject) -> Result<Image, AppError> {
        let mut state = self.state.lock();
        let image = Image {
            id: state.next_id(),
            post_id,
            name: stored.name.clone(),
            path: stored.url.clone(),
            created_at: Utc::now(),
        };
        state.images.push(image.clone());
        Ok(image)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.state.lock().images.retain(|i| i.id != id);
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryBoard {
    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, AppError> {
        Ok(self.comment(id))
    }

    async fn find_by_post(&self, post_id: i64) -> Result<Vec<CommentView>, AppError> {
        let state = self.state.lock();
        let mut comments: Vec<&Comment> = state
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .collect();
        comments.sort_by_key(|c| (c.group_num, c.created_at, c.id));
        Ok(comments
            .into_iter()
            .map(|c| CommentView {
                comment: c.clone(),
                username: state
                    .users
                    .iter()
                    .find(|u| u.id == c.user_id)
                    .map(|u| u.username.clone())
                    .unwrap_or_default(),
            })
            .collect())
    }

    async fn max_group_num(&self, post_id: i64) -> Result<i64, AppError> {
        Ok(self
            .state
            .lock()
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .map(|c| c.group_num)
            .max()
            .unwrap_or(0))
    }

    async fn create(&self, new_comment: &NewComment) -> Result<Comment, AppError> {
        let mut state = self.state.lock();
        let comment = Comment {
            id: state.next_id(),
            post_id: new_comment.post_id,
            user_id: new_comment.user_id,
            contents: new_comment.contents.clone(),
            parent: new_comment.parent,
            group_num: new_comment.group_num,
            ..Default::default()
        };
        state.comments.push(comment.clone());
        Ok(comment)
    }

    async fn update_contents(&self, id: i64, contents: &str) -> Result<Comment, AppError> {
        let mut state = self.state.lock();
        let comment = state
            .comments
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::NotFound(format!("comment {}", id)))?;
        comment.contents = contents.to_string();
        comment.last_modified_at = Utc::now();
        Ok(comment.clone())
    }

    async fn soft_delete(&self, id: i64) -> Result<(), AppError> {
        let mut state = self.state.lock();
        if let Some(comment) = state.comments.iter_mut().find(|c| c.id == id) {
            comment.deleted = true;
        }
        Ok(())
    }
}

#[async_trait]
impl LikeRepository for InMemoryBoard {
    async fn find(&self, post_id: i64, user_id: i64) -> Result<Option<Like>, AppError> {
        Ok(self
            .state
            .lock()
            .likes
            .iter()
            .find(|l| l.post_id == post_id && l.user_id == user_id)
            .cloned())
    }

    async fn create(&self, post_id: i64, user_id: i64) -> Result<Like, AppError> {
        let mut state = self.state.lock();
        if state
            .likes
            .iter()
            .any(|l| l.post_id == post_id && l.user_id == user_id)
        {
            return Err(AppError::Conflict("already liked".into()));
        }
        let like = Like {
            id: state.next_id(),
            post_id,
            user_id,
            created_at: Utc::now(),
        };
        state.likes.push(like.clone());
        Ok(like)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.state.lock().likes.retain(|l| l.id != id);
        Ok(())
    }

    async fn count_by_post(&self, post_id: i64) -> Result<i64, AppError> {
        Ok(self.like_count(post_id) as i64)
    }
}
