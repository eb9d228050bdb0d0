//! Storage doubles.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tasklet_core::{Record, StorageBackend};
use tasklet_storage::{ObjectStorage, Storage, StorageError, StorageResult};

/// Table store double: keyed rows, and deleting an absent id succeeds.
#[derive(Default)]
pub struct MockTableStorage {
    rows: Mutex<BTreeMap<String, Record>>,
}

#[async_trait]
impl Storage for MockTableStorage {
    async fn list(&self) -> StorageResult<Vec<Record>> {
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn put(&self, record: Record) -> StorageResult<Record> {
        self.rows
            .lock()
            .unwrap()
            .insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn delete(&self, id: &str) -> StorageResult<()> {
        self.rows.lock().unwrap().remove(id);
        Ok(())
    }

    async fn health_check(&self) -> StorageResult<()> {
        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::TableStore
    }
}

/// Backend whose every call fails.
pub struct FailingStorage;

#[async_trait]
impl Storage for FailingStorage {
    async fn list(&self) -> StorageResult<Vec<Record>> {
        Err(StorageError::BackendError("backend unavailable".to_string()))
    }

    async fn put(&self, _record: Record) -> StorageResult<Record> {
        Err(StorageError::BackendError("backend unavailable".to_string()))
    }

    async fn delete(&self, _id: &str) -> StorageResult<()> {
        Err(StorageError::BackendError("backend unavailable".to_string()))
    }

    async fn health_check(&self) -> StorageResult<()> {
        Err(StorageError::BackendError("backend unavailable".to_string()))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::ObjectStore
    }
}

/// In-memory object store that counts every backend call.
pub struct CountingStorage {
    inner: ObjectStorage,
    calls: Arc<AtomicUsize>,
}

impl CountingStorage {
    pub fn new() -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                inner: ObjectStorage::in_memory(),
                calls: calls.clone(),
            },
            calls,
        )
    }

    fn count(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Storage for CountingStorage {
    async fn list(&self) -> StorageResult<Vec<Record>> {
        self.count();
        self.inner.list().await
    }

    async fn put(&self, record: Record) -> StorageResult<Record> {
        self.count();
        self.inner.put(record).await
    }

    async fn delete(&self, id: &str) -> StorageResult<()> {
        self.count();
        self.inner.delete(id).await
    }

    async fn health_check(&self) -> StorageResult<()> {
        self.count();
        self.inner.health_check().await
    }

    fn backend_type(&self) -> StorageBackend {
        self.inner.backend_type()
    }
}
