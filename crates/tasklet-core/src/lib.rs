//! Tasklet Core Library
//!
//! This crate provides the record model, error types, and configuration
//! shared by the storage backends and the HTTP API.

pub mod config;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{BaseConfig, Config, StorageConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::Record;
pub use storage_types::{ObjectStoreProvider, StorageBackend};
// Note: Storage, StorageError, StorageResult live in the tasklet-storage crate
