//! # Domain Layer
//!
//! The domain layer contains the core business model of the board.
//! It is independent of any external frameworks or infrastructure concerns.
//!
//! ## Structure
//!
//! - **entities**: Core domain entities (User, Post, Tag, Image, Comment, Like)
//! - **value_objects**: Immutable value types (PostKind, status enums)
//! - **services**: Domain services for rules spanning entities
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Repository and uploader traits define external access contracts
//! - Entities encapsulate domain behavior

pub mod entities;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use value_objects::*;
