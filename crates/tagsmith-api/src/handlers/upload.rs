use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::extract_upload_file;
use axum::{
    extract::{Multipart, State},
    Json,
};
use std::sync::Arc;
use std::time::Instant;
use tagsmith_core::{StorageNamespace, UploadResponse};
use tagsmith_storage::keys;

#[utoipa::path(
    post,
    path = "/upload",
    tag = "tags",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File stored and existing tags read", body = UploadResponse),
        (status = 400, description = "Not an MP3 file or malformed form", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "File could not be parsed or stored", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, multipart),
    fields(file_id = tracing::field::Empty, operation = "upload")
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let start = Instant::now();
    let file = extract_upload_file(multipart, &state.upload_validator).await?;

    let file_id = keys::new_file_id();
    tracing::Span::current().record("file_id", file_id.as_str());

    state
        .storage
        .put(StorageNamespace::Incoming, &file_id, file.data.clone())
        .await?;

    let tags = state.tags.clone();
    let data = file.data;
    let read_result = tokio::task::spawn_blocking(move || tags.read_tags(&data))
        .await
        .map_err(super::join_error)
        .and_then(|result| result);

    let tags = match read_result {
        Ok(tags) => tags,
        Err(e) => {
            // Unparseable uploads are not kept.
            if let Err(delete_err) = state
                .storage
                .delete(StorageNamespace::Incoming, &file_id)
                .await
            {
                tracing::warn!(error = %delete_err, "Failed to remove rejected upload");
            }
            return Err(e.into());
        }
    };

    tracing::info!(
        filename = %file.filename,
        duration_ms = start.elapsed().as_millis() as u64,
        "Upload stored"
    );

    Ok(Json(UploadResponse { file_id, tags }))
}
