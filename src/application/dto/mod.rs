//! Data Transfer Objects
//!
//! DTOs for API request/response serialization.

pub mod request;
pub mod response;

pub use request::{
    CreateCommentRequest, PostForm, PostListQuery, UpdateCommentRequest, UsernameRequest,
};
pub use response::{
    CommentResponse, CountResponse, LikeResponse, PageResponse, PostResponse, StatusResponse,
};
