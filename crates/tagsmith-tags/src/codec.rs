//! Tag codec trait
//!
//! Handlers depend on this narrow interface instead of a concrete tagging
//! library. Implementations are synchronous; async callers run them on
//! `tokio::task::spawn_blocking`.

use std::path::Path;

use tagsmith_core::{TagFields, TagUpdate};

#[derive(Debug, thiserror::Error)]
pub enum TagError {
    /// The file could not be opened or parsed.
    #[error("{0}")]
    Read(String),
    /// The tag container could not be written back.
    #[error("{0}")]
    Write(String),
    /// The file cannot hold the requested tag type.
    #[error("{0}")]
    Unsupported(String),
    /// The blocking task running the codec panicked or was cancelled.
    #[error("Tag task failed: {0}")]
    Join(String),
}

pub type TagResult<T> = Result<T, TagError>;

pub trait TagCodec: Send + Sync {
    /// Parse the five text tags from raw file bytes.
    ///
    /// A file without a tag container yields all-empty fields; a file that is
    /// not valid audio is an error.
    fn read_tags(&self, data: &[u8]) -> TagResult<TagFields>;

    /// Apply `update` to the tag container of the file at `path`, in place.
    ///
    /// Fields left as `None` keep their current value. Only the tag region
    /// of the file is rewritten.
    fn write_tags(&self, path: &Path, update: &TagUpdate) -> TagResult<()>;
}
