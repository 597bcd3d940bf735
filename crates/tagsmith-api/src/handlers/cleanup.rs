use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tagsmith_core::{CleanupResponse, StorageNamespace};
use tagsmith_storage::keys;

#[utoipa::path(
    delete,
    path = "/cleanup/{file_id}",
    tag = "tags",
    params(
        ("file_id" = String, Path, description = "Identifier returned by /upload")
    ),
    responses(
        (status = 200, description = "Upload and tagged copy removed (if present)", body = CleanupResponse)
    )
)]
#[tracing::instrument(skip(state), fields(file_id = %file_id, operation = "cleanup"))]
pub async fn cleanup_files(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<String>,
) -> Json<CleanupResponse> {
    if keys::validate_file_id(&file_id).is_err() {
        tracing::debug!("Invalid file ID, nothing to clean");
        return Json(CleanupResponse::cleaned());
    }

    let tagged_file_id = keys::tagged_file_id(&file_id);
    let targets = [
        (StorageNamespace::Incoming, file_id.as_str()),
        (StorageNamespace::Processed, tagged_file_id.as_str()),
    ];

    for (namespace, id) in targets {
        if let Err(e) = state.storage.delete(namespace, id).await {
            tracing::warn!(
                error = %e,
                namespace = %namespace,
                file_id = %id,
                "Cleanup failed to delete file"
            );
        }
    }

    Json(CleanupResponse::cleaned())
}
