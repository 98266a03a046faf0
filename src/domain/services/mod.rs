//! # Domain Services
//!
//! Domain services encapsulate business rules that don't naturally belong to
//! a single entity.
//!
//! ## Services
//!
//! - **TagSet**: Tag name normalization and set comparison

mod tag_set;

pub use tag_set::*;
