pub mod cleanup;
pub mod download;
pub mod save_tags;
pub mod upload;

use tagsmith_tags::TagError;
use tokio::task::JoinError;

/// Map a failed `spawn_blocking` join into the codec's error type.
pub(crate) fn join_error(err: JoinError) -> TagError {
    TagError::Join(err.to_string())
}
