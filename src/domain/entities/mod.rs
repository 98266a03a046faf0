//! # Domain Entities
//!
//! Core domain entities representing the main business objects of the board.
//! All entities map directly to their corresponding database tables.
//!
//! ## Core Entities
//!
//! - **User**: Community member who authors posts
//! - **Post**: Chat, study or question post with title, content and hit counter
//! - **Tag / PostTag**: Uppercase tag names and their link rows
//!
//! ## Supporting Entities
//!
//! - **Image**: Stored image attached to a post
//! - **Comment**: Threaded, soft-deletable comment
//! - **Like**: One user's like on one post
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access operations.
//! These traits are implemented in the infrastructure layer, following the
//! dependency inversion principle. The image uploader trait lives next to the
//! image entity for the same reason.

mod user;
mod post;
mod tag;
mod image;
mod comment;
mod like;

pub use user::{User, UserRepository};

pub use post::{
    NewPost, PageRequest, Post, PostOrder, PostRepository, PostSearch, PostSummary,
};

pub use tag::{PostTag, Tag, TagRepository};

pub use image::{
    Image, ImageRepository, ImageUploader, StorageError, StoredObject, UploadFile,
};

#[cfg(test)]
pub use image::MockImageUploader;

pub use comment::{Comment, CommentRepository, CommentView, NewComment};

pub use like::{Like, LikeRepository};
