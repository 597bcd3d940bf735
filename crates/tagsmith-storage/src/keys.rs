//! Identifier generation and validation shared by all backends.
//!
//! Upload identifiers are UUID v4 strings. The processed copy of an upload is
//! stored under the same identifier with [`TAGGED_SUFFIX`] appended.

use uuid::Uuid;

use crate::traits::{StorageError, StorageResult};

/// Extension of every stored audio file.
pub const AUDIO_EXTENSION: &str = "mp3";

/// Suffix distinguishing a tagged record from its source upload.
pub const TAGGED_SUFFIX: &str = "_tagged";

const MAX_FILE_ID_LENGTH: usize = 128;

/// Generate a fresh upload identifier.
pub fn new_file_id() -> String {
    Uuid::new_v4().to_string()
}

/// Identifier of the tagged record derived from upload `file_id`.
pub fn tagged_file_id(file_id: &str) -> String {
    format!("{}{}", file_id, TAGGED_SUFFIX)
}

/// Filename used on disk (and for downloads) for an identifier.
pub fn object_name(file_id: &str) -> String {
    format!("{}.{}", file_id, AUDIO_EXTENSION)
}

/// Check that an identifier is safe to use as a filename stem.
///
/// Only ASCII alphanumerics, `-` and `_` are allowed, so an identifier can
/// never escape its namespace directory.
pub fn validate_file_id(file_id: &str) -> StorageResult<()> {
    if file_id.is_empty() {
        return Err(StorageError::InvalidKey("File ID is empty".to_string()));
    }

    if file_id.len() > MAX_FILE_ID_LENGTH {
        return Err(StorageError::InvalidKey(format!(
            "File ID exceeds {} characters",
            MAX_FILE_ID_LENGTH
        )));
    }

    if !file_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(StorageError::InvalidKey(
            "File ID contains invalid characters".to_string(),
        ));
    }

    Ok(())
}
