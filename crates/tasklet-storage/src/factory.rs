#[cfg(feature = "storage-object")]
use crate::ObjectStorage;
#[cfg(feature = "storage-table")]
use crate::TableStorage;
use crate::{Storage, StorageBackend, StorageError, StorageResult};
#[cfg(feature = "storage-object")]
use tasklet_core::ObjectStoreProvider;
use tasklet_core::Config;
use std::sync::Arc;

/// Create a storage backend based on configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    match config.storage_backend() {
        #[cfg(feature = "storage-object")]
        StorageBackend::ObjectStore => {
            let storage = create_object_storage(config).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-object"))]
        StorageBackend::ObjectStore => Err(StorageError::ConfigError(
            "Object store backend not available (storage-object feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-table")]
        StorageBackend::TableStore => {
            let table_name = config
                .table_name()
                .map(String::from)
                .ok_or_else(|| StorageError::ConfigError("TABLE_NAME not configured".to_string()))?;
            let region = config.aws_region().map(String::from);
            let endpoint = config.dynamodb_endpoint().map(String::from);

            let storage = TableStorage::from_env(table_name, region, endpoint).await;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-table"))]
        StorageBackend::TableStore => Err(StorageError::ConfigError(
            "Table store backend not available (storage-table feature not enabled)".to_string(),
        )),
    }
}

#[cfg(feature = "storage-object")]
async fn create_object_storage(config: &Config) -> StorageResult<ObjectStorage> {
    let provider = config.object_store_provider();
    let bucket = || {
        config
            .bucket_name()
            .map(String::from)
            .ok_or_else(|| StorageError::ConfigError("BUCKET_NAME not configured".to_string()))
    };

    match provider {
        ObjectStoreProvider::S3 => ObjectStorage::s3(
            bucket()?,
            config.aws_region().map(String::from),
            config.s3_endpoint().map(String::from),
        ),
        ObjectStoreProvider::Gcs => ObjectStorage::gcs(bucket()?),
        ObjectStoreProvider::Local => {
            let base_path = config.local_storage_path().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
            })?;
            ObjectStorage::local(base_path).await
        }
        ObjectStoreProvider::Memory => {
            tracing::warn!("Using in-memory object store - records are lost on restart");
            Ok(ObjectStorage::in_memory())
        }
    }
}
