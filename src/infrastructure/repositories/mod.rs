//! Repository Implementations
//!
//! PostgreSQL implementations of domain repository traits.
//!
//! Each repository handles data access for a single table (plus the joins its
//! read models need).
//!
//! ## Available Repositories
//!
//! - **UserRepository** - Read-only user lookups
//! - **PostRepository** - Posts of every kind, search and rankings
//! - **TagRepository** - Tags and post-tag links
//! - **ImageRepository** - Stored image records
//! - **CommentRepository** - Threaded comments
//! - **LikeRepository** - Post likes
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use crate::infrastructure::repositories::{PgPostRepository, PgUserRepository};
//!
//! async fn setup_repositories(pool: PgPool) {
//!     let user_repo = PgUserRepository::new(pool.clone());
//!     let post_repo = PgPostRepository::new(pool.clone());
//! }
//! ```

pub mod user_repository;
pub mod post_repository;
pub mod tag_repository;
pub mod image_repository;
pub mod comment_repository;
pub mod like_repository;

pub use user_repository::PgUserRepository;
pub use post_repository::PgPostRepository;
pub use tag_repository::PgTagRepository;
pub use image_repository::PgImageRepository;
pub use comment_repository::PgCommentRepository;
pub use like_repository::PgLikeRepository;
