//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageNamespace;
use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::path::PathBuf;
use std::pin::Pin;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Chunked file contents, as produced by [`Storage::download_stream`].
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, StorageError>> + Send>>;

/// Storage abstraction trait
///
/// Files are keyed by a namespace plus an identifier (see [`crate::keys`]).
/// There is no index: a file exists exactly when the backend holds it.
/// Handlers only see this trait, so the backend is injected rather than
/// hard-wired to fixed directories.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store `data` verbatim, replacing any previous file with that identifier.
    async fn put(&self, namespace: StorageNamespace, file_id: &str, data: Bytes)
        -> StorageResult<()>;

    /// Local filesystem path of a file, for tools that edit files in place.
    ///
    /// The file need not exist.
    fn path(&self, namespace: StorageNamespace, file_id: &str) -> StorageResult<PathBuf>;

    /// Verify the backend is usable (directories present, bucket reachable, ...)
    async fn health_check(&self) -> StorageResult<()>;

    /// Check if a file exists
    async fn exists(&self, namespace: StorageNamespace, file_id: &str) -> StorageResult<bool>;

    /// Delete a file. Deleting an absent file succeeds.
    async fn delete(&self, namespace: StorageNamespace, file_id: &str) -> StorageResult<()>;

    /// Copy a file byte-for-byte, overwriting the destination.
    async fn copy(
        &self,
        from: (StorageNamespace, &str),
        to: (StorageNamespace, &str),
    ) -> StorageResult<()>;

    /// Get the size in bytes of a file, if it exists.
    async fn content_length(&self, namespace: StorageNamespace, file_id: &str)
        -> StorageResult<u64>;

    /// Download a file as a stream
    ///
    /// The stream yields `Bytes` chunks as they are read, so large files are
    /// never held in memory.
    async fn download_stream(
        &self,
        namespace: StorageNamespace,
        file_id: &str,
    ) -> StorageResult<ByteStream>;
}
