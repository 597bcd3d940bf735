use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, Response, StatusCode},
    response::IntoResponse,
};
use futures::StreamExt;
use std::sync::Arc;
use tagsmith_core::{AppError, StorageNamespace};
use tagsmith_storage::{keys, StorageError};

#[utoipa::path(
    get,
    path = "/download/{tagged_file_id}",
    tag = "tags",
    params(
        ("tagged_file_id" = String, Path, description = "Identifier returned by /save-tags")
    ),
    responses(
        (status = 200, description = "Tagged MP3 file", content_type = "audio/mpeg"),
        (status = 404, description = "Tagged file not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(tagged_file_id = %tagged_file_id, operation = "download"))]
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Path(tagged_file_id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let not_found = || AppError::NotFound("Tagged file not found".to_string());

    if keys::validate_file_id(&tagged_file_id).is_err() {
        return Err(not_found().into());
    }

    let content_length = match state
        .storage
        .content_length(StorageNamespace::Processed, &tagged_file_id)
        .await
    {
        Ok(len) => len,
        Err(StorageError::NotFound(_)) => return Err(not_found().into()),
        Err(e) => return Err(e.into()),
    };

    let stream = state
        .storage
        .download_stream(StorageNamespace::Processed, &tagged_file_id)
        .await?;

    // Wrap storage stream for axum Body
    let body_stream = stream.map(|result| {
        result.map_err(|e| std::io::Error::other(format!("Storage stream error: {}", e)))
    });

    let content_disposition = format!(
        "attachment; filename=\"{}\"",
        keys::object_name(&tagged_file_id)
    );

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "audio/mpeg")
        .header(header::CONTENT_DISPOSITION, content_disposition.as_str())
        .header(header::CONTENT_LENGTH, content_length)
        .body(Body::from_stream(body_stream))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}
