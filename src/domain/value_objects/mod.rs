//! # Domain Value Objects
//!
//! Immutable value types that represent domain concepts without identity.
//!
//! ## Value Objects
//!
//! - **PostKind**: Chat, study or question
//! - **StudyStatus / QuestionStatus**: Two-value status per kind, toggled by the owner
//! - **PostStatus**: Kind-tagged union of the two status enums

mod post_kind;

pub use post_kind::*;
