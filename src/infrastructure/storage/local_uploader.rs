//! Local filesystem image uploader.
//!
//! Objects are written below a root directory and served by the HTTP layer
//! under a public URL prefix.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::config::StorageSettings;
use crate::domain::{ImageUploader, StorageError, StoredObject, UploadFile};
use crate::infrastructure::metrics;

/// Stores images as files under `root/<prefix>/<uuid>_<name>`.
#[derive(Debug, Clone)]
pub struct LocalImageUploader {
    root: PathBuf,
    public_url: String,
    max_bytes: usize,
}

impl LocalImageUploader {
    pub fn new(root: impl AsRef<Path>, public_url: impl Into<String>, max_bytes: usize) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            public_url: public_url.into().trim_end_matches('/').to_string(),
            max_bytes,
        }
    }

    pub fn from_settings(settings: &StorageSettings) -> Self {
        Self::new(&settings.root, settings.public_url.clone(), settings.max_image_bytes)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a key to a full path
    fn resolve_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        // Prevent directory traversal
        if key.is_empty()
            || key.contains("..")
            || key.starts_with('/')
            || key.starts_with('\\')
            || key.contains(':')
        {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        Ok(self.root.join(key))
    }

    fn public_url_for(&self, key: &str) -> String {
        format!("{}/{}", self.public_url, key)
    }

    async fn write(&self, key: &str, file: &UploadFile) -> Result<(), StorageError> {
        let path = self.resolve_path(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut out = fs::File::create(&path).await?;
        out.write_all(&file.data).await?;
        out.sync_all().await?;

        debug!(path = ?path, size = file.size(), "Image stored");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.resolve_path(key)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(path = ?path, "Image deleted");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Keep the last path component and replace anything outside `[A-Za-z0-9._-]`.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "image".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Declared content type if present, otherwise guessed from the file name.
fn is_image(file: &UploadFile) -> bool {
    match file.content_type.as_deref() {
        Some(ct) if !ct.is_empty() && ct != "application/octet-stream" => ct.starts_with("image/"),
        _ => mime_guess::from_path(&file.filename)
            .first()
            .map(|m| m.type_() == mime_guess::mime::IMAGE)
            .unwrap_or(false),
    }
}

#[async_trait]
impl ImageUploader for LocalImageUploader {
    #[instrument(skip(self, file), fields(storage = "local", filename = %file.filename))]
    async fn upload(
        &self,
        file: &UploadFile,
        prefix: &str,
        post_id: i64,
    ) -> Result<StoredObject, StorageError> {
        if file.size() > self.max_bytes {
            metrics::record_image_operation("upload", false);
            return Err(StorageError::TooLarge {
                size: file.size(),
                max: self.max_bytes,
            });
        }
        if !is_image(file) {
            metrics::record_image_operation("upload", false);
            return Err(StorageError::UnsupportedType(file.filename.clone()));
        }

        let key = format!(
            "{}/{}_{}",
            prefix.trim_matches('/'),
            Uuid::new_v4(),
            sanitize_filename(&file.filename)
        );

        let result = self.write(&key, file).await;
        metrics::record_image_operation("upload", result.is_ok());
        result?;

        debug!(post_id, key = %key, "Upload complete");

        Ok(StoredObject {
            url: self.public_url_for(&key),
            name: key,
        })
    }

    #[instrument(skip(self), fields(storage = "local"))]
    async fn delete(&self, name: &str) -> Result<(), StorageError> {
        let result = self.remove(name).await;
        metrics::record_image_operation("delete", result.is_ok());
        result
    }
}
