//! Custom Extractors
//!
//! Axum extractors for request parsing.

use axum::{
    extract::{
        multipart::{Field, MultipartError},
        FromRequest, Multipart, Request,
    },
    http::StatusCode,
};

use crate::application::dto::request::PostForm;
use crate::domain::UploadFile;
use crate::shared::error::AppError;

/// Reads the post form from a `multipart/form-data` body.
///
/// Unknown fields are ignored. File parts without a name and content (an
/// empty `<input type="file">`) are skipped.
impl<S> FromRequest<S> for PostForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        let mut form = PostForm::default();
        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "username" => form.username = Some(text(field).await?),
                "title" => form.title = text(field).await?,
                "content" => form.content = text(field).await?,
                "tags" => form.tags.push(text(field).await?),
                "images" => {
                    if let Some(file) = upload_file(field).await? {
                        form.images.push(file);
                    }
                }
                _ => {}
            }
        }

        Ok(form)
    }
}

async fn text(field: Field<'_>) -> Result<String, AppError> {
    field.text().await.map_err(multipart_error)
}

async fn upload_file(field: Field<'_>) -> Result<Option<UploadFile>, AppError> {
    let filename = field.file_name().unwrap_or_default().to_string();
    let content_type = field.content_type().map(str::to_string);
    let data = field.bytes().await.map_err(multipart_error)?;

    if filename.is_empty() && data.is_empty() {
        return Ok(None);
    }

    Ok(Some(UploadFile {
        filename,
        content_type,
        data,
    }))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(err.body_text())
    }
}
