use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::extract_tag_update;
use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use std::sync::Arc;
use std::time::Instant;
use tagsmith_core::{AppError, SaveTagsResponse, StorageNamespace};
use tagsmith_storage::keys;

#[utoipa::path(
    post,
    path = "/save-tags/{file_id}",
    tag = "tags",
    params(
        ("file_id" = String, Path, description = "Identifier returned by /upload")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Tagged copy written", body = SaveTagsResponse),
        (status = 400, description = "Invalid cover image or malformed form", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse),
        (status = 413, description = "Cover image too large", body = ErrorResponse),
        (status = 500, description = "Tags could not be written", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(file_id = %file_id, operation = "save_tags"))]
pub async fn save_tags(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<String>,
    multipart: Multipart,
) -> Result<Json<SaveTagsResponse>, HttpAppError> {
    let start = Instant::now();

    // Invalid identifiers can never name an upload.
    let exists = keys::validate_file_id(&file_id).is_ok()
        && state
            .storage
            .exists(StorageNamespace::Incoming, &file_id)
            .await?;
    if !exists {
        return Err(AppError::NotFound("File not found".to_string()).into());
    }

    let update = extract_tag_update(multipart, &state.cover_validator).await?;

    let tagged_file_id = keys::tagged_file_id(&file_id);
    state
        .storage
        .copy(
            (StorageNamespace::Incoming, &file_id),
            (StorageNamespace::Processed, &tagged_file_id),
        )
        .await?;

    let path = state
        .storage
        .path(StorageNamespace::Processed, &tagged_file_id)?;
    let tags = state.tags.clone();
    let fields: Vec<&'static str> = update.text_fields().map(|(name, _)| name).collect();
    let has_cover = update.cover.is_some();

    let write_result = tokio::task::spawn_blocking(move || tags.write_tags(&path, &update))
        .await
        .map_err(super::join_error)
        .and_then(|result| result);

    if let Err(e) = write_result {
        if let Err(delete_err) = state
            .storage
            .delete(StorageNamespace::Processed, &tagged_file_id)
            .await
        {
            tracing::warn!(error = %delete_err, "Failed to remove partial tagged file");
        }
        return Err(e.into());
    }

    tracing::info!(
        tagged_file_id = %tagged_file_id,
        fields = ?fields,
        cover = has_cover,
        duration_ms = start.elapsed().as_millis() as u64,
        "Tags saved"
    );

    Ok(Json(SaveTagsResponse { tagged_file_id }))
}
