#[cfg(feature = "storage-local")]
use crate::LocalStorage;
use crate::{Storage, StorageResult};
use std::sync::Arc;
use tagsmith_core::Config;

/// Create the storage backend described by the configuration
#[cfg(feature = "storage-local")]
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let storage = LocalStorage::new(config.upload_dir.clone(), config.output_dir.clone()).await?;

    tracing::info!(
        upload_dir = %config.upload_dir.display(),
        output_dir = %config.output_dir.display(),
        "Local storage initialized"
    );

    Ok(Arc::new(storage))
}

#[cfg(not(feature = "storage-local"))]
pub async fn create_storage(_config: &Config) -> StorageResult<Arc<dyn Storage>> {
    Err(crate::StorageError::ConfigError(
        "Local storage backend not available (storage-local feature not enabled)".to_string(),
    ))
}

#[cfg(all(test, feature = "storage-local"))]
mod tests {
    use super::*;
    use crate::StorageNamespace;

    #[tokio::test]
    async fn test_create_storage_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_dirs(dir.path().join("in"), dir.path().join("out"));

        let storage = create_storage(&config).await.unwrap();

        assert!(dir.path().join("in").is_dir());
        assert!(dir.path().join("out").is_dir());
        assert!(storage.health_check().await.is_ok());
        assert!(!storage
            .exists(StorageNamespace::Incoming, "nothing")
            .await
            .unwrap());
    }
}
