//! Storage setup and initialization

use anyhow::{Context, Result};
use std::sync::Arc;
use tasklet_core::Config;
use tasklet_storage::{create_storage, Storage};

/// Build the configured backend and probe it once.
///
/// An unreachable backend is a startup failure: the error is returned before
/// the listener is bound.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!(backend = %config.storage_backend(), "Initializing storage backend...");
    let storage = create_storage(config)
        .await
        .context("Failed to create storage backend")?;

    storage
        .health_check()
        .await
        .with_context(|| format!("Storage backend {} is not reachable", storage.backend_type()))?;

    tracing::info!(
        backend = %storage.backend_type(),
        "Storage backend initialized successfully"
    );
    Ok(storage)
}
