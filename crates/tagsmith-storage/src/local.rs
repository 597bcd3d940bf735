use crate::keys::{object_name, validate_file_id};
use crate::traits::{ByteStream, Storage, StorageError, StorageResult};
use crate::StorageNamespace;
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
///
/// Each namespace is a flat directory holding `{file_id}.mp3` files.
#[derive(Clone, Debug)]
pub struct LocalStorage {
    incoming_dir: PathBuf,
    processed_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance, creating both directories if needed
    ///
    /// # Arguments
    /// * `incoming_dir` - Directory for original uploads (e.g., "uploads")
    /// * `processed_dir` - Directory for tagged copies (e.g., "output")
    pub async fn new(
        incoming_dir: impl Into<PathBuf>,
        processed_dir: impl Into<PathBuf>,
    ) -> StorageResult<Self> {
        let incoming_dir = incoming_dir.into();
        let processed_dir = processed_dir.into();

        for dir in [&incoming_dir, &processed_dir] {
            fs::create_dir_all(dir).await.map_err(|e| {
                StorageError::ConfigError(format!(
                    "Failed to create storage directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
        }

        Ok(LocalStorage {
            incoming_dir,
            processed_dir,
        })
    }

    fn namespace_dir(&self, namespace: StorageNamespace) -> &Path {
        match namespace {
            StorageNamespace::Incoming => &self.incoming_dir,
            StorageNamespace::Processed => &self.processed_dir,
        }
    }

    /// Convert a namespaced identifier to a filesystem path
    ///
    /// Identifiers are validated first, so the result always lies directly
    /// inside the namespace directory.
    fn key_to_path(&self, namespace: StorageNamespace, file_id: &str) -> StorageResult<PathBuf> {
        validate_file_id(file_id)?;
        Ok(self.namespace_dir(namespace).join(object_name(file_id)))
    }
}

async fn path_exists(path: &Path) -> StorageResult<bool> {
    fs::try_exists(path).await.map_err(|e| {
        StorageError::BackendError(format!("Failed to stat {}: {}", path.display(), e))
    })
}

#[async_trait]
impl Storage for LocalStorage {
    async fn put(
        &self,
        namespace: StorageNamespace,
        file_id: &str,
        data: Bytes,
    ) -> StorageResult<()> {
        let path = self.key_to_path(namespace, file_id)?;
        let size = data.len();
        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            namespace = %namespace,
            file_id = %file_id,
            path = %path.display(),
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage put successful"
        );

        Ok(())
    }

    fn path(&self, namespace: StorageNamespace, file_id: &str) -> StorageResult<PathBuf> {
        self.key_to_path(namespace, file_id)
    }

    async fn health_check(&self) -> StorageResult<()> {
        for dir in [&self.incoming_dir, &self.processed_dir] {
            let meta = fs::metadata(dir).await.map_err(|e| {
                StorageError::BackendError(format!("{}: {}", dir.display(), e))
            })?;
            if !meta.is_dir() {
                return Err(StorageError::BackendError(format!(
                    "{} is not a directory",
                    dir.display()
                )));
            }
        }
        Ok(())
    }

    async fn exists(&self, namespace: StorageNamespace, file_id: &str) -> StorageResult<bool> {
        let path = self.key_to_path(namespace, file_id)?;
        path_exists(&path).await
    }

    async fn delete(&self, namespace: StorageNamespace, file_id: &str) -> StorageResult<()> {
        let path = self.key_to_path(namespace, file_id)?;
        let start = std::time::Instant::now();

        match fs::remove_file(&path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                return Err(StorageError::DeleteFailed(format!(
                    "Failed to delete file {}: {}",
                    path.display(),
                    e
                )))
            }
        }

        tracing::info!(
            namespace = %namespace,
            file_id = %file_id,
            path = %path.display(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage delete successful"
        );

        Ok(())
    }

    async fn copy(
        &self,
        from: (StorageNamespace, &str),
        to: (StorageNamespace, &str),
    ) -> StorageResult<()> {
        let from_path = self.key_to_path(from.0, from.1)?;
        let to_path = self.key_to_path(to.0, to.1)?;
        let start = std::time::Instant::now();

        if !path_exists(&from_path).await? {
            return Err(StorageError::NotFound(from.1.to_string()));
        }

        let size = fs::copy(&from_path, &to_path).await.map_err(|e| {
            StorageError::BackendError(format!(
                "Failed to copy {} to {}: {}",
                from_path.display(),
                to_path.display(),
                e
            ))
        })?;

        tracing::info!(
            from_namespace = %from.0,
            from_file_id = %from.1,
            to_namespace = %to.0,
            to_file_id = %to.1,
            to_path = %to_path.display(),
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage copy successful"
        );

        Ok(())
    }

    async fn content_length(
        &self,
        namespace: StorageNamespace,
        file_id: &str,
    ) -> StorageResult<u64> {
        let path = self.key_to_path(namespace, file_id)?;
        let meta = fs::metadata(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound(file_id.to_string())
            } else {
                StorageError::BackendError(e.to_string())
            }
        })?;
        Ok(meta.len())
    }

    async fn download_stream(
        &self,
        namespace: StorageNamespace,
        file_id: &str,
    ) -> StorageResult<ByteStream> {
        let path = self.key_to_path(namespace, file_id)?;

        let file = fs::File::open(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound(file_id.to_string())
            } else {
                StorageError::DownloadFailed(format!(
                    "Failed to open file {}: {}",
                    path.display(),
                    e
                ))
            }
        })?;

        let path_display = path.display().to_string();
        let stream = tokio_util::io::ReaderStream::new(file).map(move |result| {
            result.map_err(|e| {
                tracing::error!(path = %path_display, error = %e, "Local storage stream read error");
                StorageError::DownloadFailed(format!("Failed to read chunk: {}", e))
            })
        });

        Ok(Box::pin(stream))
    }
}
