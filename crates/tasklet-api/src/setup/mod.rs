//! Application setup and initialization
//!
//! Everything `main` needs before binding the listener: configuration checks,
//! tracing, the storage backend and the router. Tests call the same pieces to
//! build an app around a storage double.

pub mod routes;
pub mod server;
pub mod storage;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use tasklet_core::Config;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry(config.environment())?;

    // Fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    tracing::info!("Configuration loaded and validated successfully");

    let storage = storage::setup_storage(&config).await?;

    let state = Arc::new(AppState::new(storage));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
