//! Image Storage
//!
//! Implementations of the domain `ImageUploader` trait.

mod local_uploader;

pub use local_uploader::{sanitize_filename, LocalImageUploader};
