//! Storage abstraction trait
//!
//! This module defines the Storage trait that all record backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use tasklet_core::{AppError, Record};
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Failed to decode {key}: {message}")]
    Decode { key: String, message: String },

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidKey(msg) => AppError::InvalidInput(msg),
            other => AppError::Storage(other.to_string()),
        }
    }
}

/// Record storage abstraction
///
/// Every backend stores each record under its `id` and must be usable
/// concurrently from many requests; no operation synchronizes with another
/// in-process.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Return every stored record.
    ///
    /// Any underlying pagination is exhausted before returning. Order is the
    /// backend's native order and is not stable.
    async fn list(&self) -> StorageResult<Vec<Record>>;

    /// Write the record at its id, replacing whatever was there.
    async fn put(&self, record: Record) -> StorageResult<Record>;

    /// Remove the record with the given id.
    ///
    /// Whether an absent id is an error is backend-defined.
    async fn delete(&self, id: &str) -> StorageResult<()>;

    /// Cheap reachability probe used at startup and by the health endpoint.
    async fn health_check(&self) -> StorageResult<()>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
