//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **PostService**: Post lifecycle, ranking and listings for every post kind
//! - **TagService**: Tag name resolution
//! - **CommentService**: Threaded comments
//! - **LikeService**: Like toggling

pub mod post_service;
pub mod tag_service;
pub mod comment_service;
pub mod like_service;

#[cfg(test)]
pub(crate) mod testing;

// Re-export post service types
pub use post_service::{
    CreatePostDto, PostError, PostService, PostServiceImpl, UpdatePostDto, TOP_RANKING_SIZE,
};

// Re-export tag service types
pub use tag_service::{TagError, TagService};

// Re-export comment service types
pub use comment_service::{CommentError, CommentService, CommentServiceImpl, CreateCommentDto};

// Re-export like service types
pub use like_service::{LikeError, LikeService, LikeServiceImpl};
