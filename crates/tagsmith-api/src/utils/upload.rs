//! Multipart extraction for the upload and save-tags forms

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::Multipart;
use axum::http::StatusCode;
use bytes::Bytes;
use tagsmith_core::{AppError, CoverArt, TagUpdate};
use tagsmith_tags::MediaValidator;

use crate::error::HttpAppError;

/// File payload of an upload form.
#[derive(Debug)]
pub struct UploadedFile {
    pub data: Bytes,
    pub filename: String,
}

fn multipart_error(context: &str, err: MultipartError) -> AppError {
    // Body limit rejections surface here once the stream is read.
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge(format!("{}: {}", context, err.body_text()));
    }
    AppError::InvalidInput(format!("{}: {}", context, err.body_text()))
}

async fn read_field(field: Field<'_>) -> Result<Bytes, AppError> {
    field
        .bytes()
        .await
        .map_err(|e| multipart_error("Failed to read file data", e))
}

/// Extract the single `file` field of an upload form.
///
/// The filename extension is checked before the payload is read; the size
/// limit is checked once it has been read. Other fields are ignored.
pub async fn extract_upload_file(
    mut multipart: Multipart,
    validator: &MediaValidator,
) -> Result<UploadedFile, HttpAppError> {
    let mut upload: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Failed to read multipart", e))?
    {
        if field.name() != Some("file") {
            continue;
        }

        if upload.is_some() {
            return Err(AppError::InvalidInput(
                "Multiple file fields are not allowed; send exactly one field named 'file'"
                    .to_string(),
            )
            .into());
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        validator.validate_extension(&filename)?;

        let data = read_field(field).await?;
        validator.validate_file_size(data.len())?;

        upload = Some(UploadedFile { data, filename });
    }

    upload.ok_or_else(|| AppError::InvalidInput("No file provided".to_string()).into())
}

/// Extract the save-tags form: the five optional text fields plus an
/// optional `cover` image.
///
/// Empty text fields and an empty cover count as omitted. Unknown fields are
/// ignored.
pub async fn extract_tag_update(
    mut multipart: Multipart,
    cover_validator: &MediaValidator,
) -> Result<TagUpdate, HttpAppError> {
    let mut update = TagUpdate::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Failed to read multipart", e))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "cover" {
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = read_field(field).await?;
            if data.is_empty() {
                continue;
            }

            cover_validator.validate_content_type(&content_type)?;
            cover_validator.validate_file_size(data.len())?;

            update.cover = Some(CoverArt {
                data,
                mime_type: content_type,
            });
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| multipart_error(&format!("Failed to read field '{}'", name), e))?;
        if !update.set_field(&name, value) {
            tracing::debug!(field = %name, "Ignoring unknown form field");
        }
    }

    Ok(update)
}
