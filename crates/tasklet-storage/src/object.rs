use crate::keys::record_path;
use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use object_store::aws::AmazonS3Builder;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::Error as ObjectStoreError;
use object_store::{ObjectStoreExt, PutPayload};
use std::sync::Arc;
use tasklet_core::Record;

/// Object store record storage
///
/// Each record is one object named by its id, holding the record as JSON.
/// The same code drives S3, GCS, a local directory or process memory; only
/// the constructor differs.
#[derive(Clone)]
pub struct ObjectStorage {
    store: Arc<dyn object_store::ObjectStore>,
    namespace: String, // Bucket name or directory, used for logging
}

impl ObjectStorage {
    pub fn new(store: Arc<dyn object_store::ObjectStore>, namespace: impl Into<String>) -> Self {
        ObjectStorage {
            store,
            namespace: namespace.into(),
        }
    }

    /// Create an S3-backed instance
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region; may be omitted when `endpoint_url` points at an
    ///   S3-compatible provider
    /// * `endpoint_url` - Optional custom endpoint (e.g. "http://localhost:9000" for MinIO)
    pub fn s3(
        bucket: String,
        region: Option<String>,
        endpoint_url: Option<String>,
    ) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket.clone());

        if let Some(region) = region {
            builder = builder.with_region(region);
        }

        if let Some(ref endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(Self::new(Arc::new(store), bucket))
    }

    /// Create a Google Cloud Storage backed instance.
    ///
    /// Credentials come from the standard `GOOGLE_*` environment variables.
    pub fn gcs(bucket: String) -> StorageResult<Self> {
        let store = GoogleCloudStorageBuilder::from_env()
            .with_bucket_name(bucket.clone())
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(Self::new(Arc::new(store), bucket))
    }

    /// Create an instance rooted at a local directory, creating it if needed.
    pub async fn local(base_path: impl AsRef<std::path::Path>) -> StorageResult<Self> {
        let base_path = base_path.as_ref();
        tokio::fs::create_dir_all(base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        let store = LocalFileSystem::new_with_prefix(base_path)
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(Self::new(
            Arc::new(store),
            base_path.to_string_lossy().to_string(),
        ))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemory::new()), "memory")
    }

    /// Walk the whole namespace and collect every object location.
    ///
    /// The provider's list stream follows continuation tokens itself. A
    /// not-found reported by the enumeration ends it.
    async fn enumerate(&self) -> StorageResult<Vec<Path>> {
        let mut stream = object_store::ObjectStore::list(self.store.as_ref(), None);
        let mut locations = Vec::new();

        while let Some(item) = stream.next().await {
            match item {
                Ok(meta) => locations.push(meta.location),
                Err(ObjectStoreError::NotFound { .. }) => break,
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        bucket = %self.namespace,
                        "Object listing failed"
                    );
                    return Err(StorageError::BackendError(e.to_string()));
                }
            }
        }

        Ok(locations)
    }

    /// Read and decode one object. `None` means it vanished after being listed.
    async fn read_record(&self, location: &Path) -> StorageResult<Option<Record>> {
        let key = location.as_ref();

        let result = match self.store.get(location).await {
            Ok(result) => result,
            Err(ObjectStoreError::NotFound { .. }) => {
                tracing::debug!(bucket = %self.namespace, key = %key, "Object deleted during listing");
                return Ok(None);
            }
            Err(e) => {
                tracing::error!(error = %e, bucket = %self.namespace, key = %key, "Object read failed");
                return Err(StorageError::BackendError(e.to_string()));
            }
        };

        let bytes = match result.bytes().await {
            Ok(bytes) => bytes,
            Err(ObjectStoreError::NotFound { .. }) => {
                tracing::debug!(bucket = %self.namespace, key = %key, "Object deleted during listing");
                return Ok(None);
            }
            Err(e) => {
                tracing::error!(error = %e, bucket = %self.namespace, key = %key, "Object read failed");
                return Err(StorageError::BackendError(e.to_string()));
            }
        };

        let decode_error = |message: String| {
            tracing::error!(error = %message, bucket = %self.namespace, key = %key, "Object is not a record");
            StorageError::Decode {
                key: key.to_string(),
                message,
            }
        };

        // Field defaults apply to create bodies only; a stored record must
        // still carry its id.
        let record = serde_json::from_slice::<Record>(&bytes)
            .map_err(|e| decode_error(e.to_string()))?;
        record
            .ensure_valid()
            .map_err(|e| decode_error(e.to_string()))?;

        Ok(Some(record))
    }

    async fn read_records(&self, locations: Vec<Path>) -> StorageResult<Vec<Record>> {
        let mut records = Vec::with_capacity(locations.len());
        for location in &locations {
            if let Some(record) = self.read_record(location).await? {
                records.push(record);
            }
        }
        Ok(records)
    }
}

#[async_trait]
impl Storage for ObjectStorage {
    async fn list(&self) -> StorageResult<Vec<Record>> {
        let start = std::time::Instant::now();

        let locations = self.enumerate().await?;
        let listed = locations.len();
        let records = self.read_records(locations).await?;

        tracing::info!(
            bucket = %self.namespace,
            listed,
            returned = records.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Object store list successful"
        );

        Ok(records)
    }

    async fn put(&self, record: Record) -> StorageResult<Record> {
        let location = record_path(&record.id)?;
        let body =
            serde_json::to_vec(&record).map_err(|e| StorageError::Serialization(e.to_string()))?;
        let size = body.len() as u64;
        let start = std::time::Instant::now();

        self.store
            .put(&location, PutPayload::from(Bytes::from(body)))
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.namespace,
                    key = %record.id,
                    size_bytes = size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Object store put failed"
                );
                StorageError::BackendError(e.to_string())
            })?;

        tracing::info!(
            bucket = %self.namespace,
            key = %record.id,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Object store put successful"
        );

        Ok(record)
    }

    async fn delete(&self, id: &str) -> StorageResult<()> {
        let location = record_path(id)?;
        let start = std::time::Instant::now();

        // Some providers acknowledge deletes of absent keys; check first so
        // an absent record is reported the same way everywhere.
        match self.store.head(&location).await {
            Ok(_) => {}
            Err(ObjectStoreError::NotFound { .. }) => {
                tracing::debug!(bucket = %self.namespace, key = %id, "Object to delete not found");
                return Err(StorageError::NotFound(id.to_string()));
            }
            Err(e) => {
                tracing::error!(error = %e, bucket = %self.namespace, key = %id, "Object head failed");
                return Err(StorageError::BackendError(e.to_string()));
            }
        }

        self.store.delete(&location).await.map_err(|e| match e {
            ObjectStoreError::NotFound { .. } => StorageError::NotFound(id.to_string()),
            other => {
                tracing::error!(
                    error = %other,
                    bucket = %self.namespace,
                    key = %id,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Object store delete failed"
                );
                StorageError::BackendError(other.to_string())
            }
        })?;

        tracing::info!(
            bucket = %self.namespace,
            key = %id,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Object store delete successful"
        );

        Ok(())
    }

    async fn health_check(&self) -> StorageResult<()> {
        let mut stream = object_store::ObjectStore::list(self.store.as_ref(), None);
        match stream.next().await {
            None | Some(Ok(_)) | Some(Err(ObjectStoreError::NotFound { .. })) => Ok(()),
            Some(Err(e)) => Err(StorageError::BackendError(e.to_string())),
        }
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::ObjectStore
    }
}
