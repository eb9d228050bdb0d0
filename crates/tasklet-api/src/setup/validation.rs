//! Configuration validation
//!
//! Runs the core checks and adds the ones that only matter to the HTTP server.

use anyhow::Result;
use tasklet_core::Config;

/// Validate critical configuration values before any client is built.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    let is_production = config.is_production();
    let env_var = std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .ok();

    if is_production && env_var.is_none() {
        tracing::warn!("Production mode detected but ENVIRONMENT/APP_ENV not set");
    }

    if config.http_concurrency_limit() == 0 {
        return Err(anyhow::anyhow!("HTTP concurrency limit cannot be 0"));
    }

    if config.storage_backend() == tasklet_core::StorageBackend::ObjectStore
        && config.object_store_provider() == tasklet_core::ObjectStoreProvider::Memory
        && is_production
    {
        tracing::warn!("In-memory object store selected in production - records will not survive a restart");
    }

    tracing::info!(
        backend = %config.storage_backend(),
        environment = %config.environment(),
        "Configuration validation passed"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasklet_core::{BaseConfig, ObjectStoreProvider, StorageBackend, StorageConfig};

    fn config(concurrency: usize) -> Config {
        Config {
            base: BaseConfig {
                server_port: 9090,
                cors_origins: vec!["*".to_string()],
                environment: "development".to_string(),
                http_concurrency_limit: concurrency,
                max_body_bytes: 65_536,
            },
            storage: StorageConfig {
                backend: StorageBackend::ObjectStore,
                object_store_provider: ObjectStoreProvider::Memory,
                bucket_name: None,
                local_storage_path: None,
                s3_endpoint: None,
                table_name: None,
                dynamodb_endpoint: None,
                aws_region: None,
            },
        }
    }

    #[test]
    fn test_accepts_memory_store() {
        assert!(validate_config(&config(16)).is_ok());
    }

    #[test]
    fn test_rejects_zero_concurrency() {
        assert!(validate_config(&config(0)).is_err());
    }

    #[test]
    fn test_rejects_missing_table_name() {
        let mut config = config(16);
        config.storage.backend = StorageBackend::TableStore;
        assert!(validate_config(&config).is_err());
    }
}
