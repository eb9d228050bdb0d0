//! Configuration module
//!
//! Configuration is read once from the environment at startup and passed
//! explicitly to the storage factory and the router. Nothing here is global.

use std::env;

use crate::storage_types::{ObjectStoreProvider, StorageBackend};

// Common constants
const SERVER_PORT: u16 = 9090;
const HTTP_CONCURRENCY_LIMIT: usize = 10_000;
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Server-level settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub http_concurrency_limit: usize,
    pub max_body_bytes: usize,
}

/// Storage backend selection and its opaque initialization parameters
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub object_store_provider: ObjectStoreProvider,
    pub bucket_name: Option<String>,
    pub local_storage_path: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, etc.)
    pub table_name: Option<String>,
    pub dynamodb_endpoint: Option<String>, // DynamoDB Local / LocalStack
    pub aws_region: Option<String>,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    pub storage: StorageConfig,
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let base = BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            http_concurrency_limit: env::var("HTTP_CONCURRENCY_LIMIT")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(HTTP_CONCURRENCY_LIMIT)
                .max(1),
            max_body_bytes: env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(MAX_BODY_BYTES),
        };

        let backend = match non_empty_var("STORAGE_BACKEND") {
            Some(value) => value.parse()?,
            None => StorageBackend::ObjectStore,
        };

        let object_store_provider = match non_empty_var("OBJECT_STORE_PROVIDER") {
            Some(value) => value.parse()?,
            None => ObjectStoreProvider::Gcs,
        };

        let storage = StorageConfig {
            backend,
            object_store_provider,
            bucket_name: non_empty_var("BUCKET_NAME")
                .or_else(|| non_empty_var("GCP_BUCKET_NAME"))
                .or_else(|| non_empty_var("S3_BUCKET")),
            local_storage_path: non_empty_var("LOCAL_STORAGE_PATH"),
            s3_endpoint: non_empty_var("S3_ENDPOINT"),
            table_name: non_empty_var("TABLE_NAME").or_else(|| non_empty_var("DYNAMODB_TABLE")),
            dynamodb_endpoint: non_empty_var("DYNAMODB_ENDPOINT"),
            aws_region: non_empty_var("AWS_REGION"),
        };

        let config = Config { base, storage };
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration before any backend client is built.
    ///
    /// The core treats namespace identifiers as opaque; it only requires the
    /// one the selected backend needs to be present and non-empty.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.max_body_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_BODY_BYTES cannot be 0"));
        }

        if self.is_production() && self.base.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let storage = &self.storage;
        match storage.backend {
            StorageBackend::ObjectStore => {
                let provider = storage.object_store_provider;
                if provider.requires_bucket() && !is_set(&storage.bucket_name) {
                    return Err(anyhow::anyhow!(
                        "BUCKET_NAME must be set when using the {} object store",
                        provider
                    ));
                }
                match provider {
                    ObjectStoreProvider::S3
                        if storage.aws_region.is_none() && storage.s3_endpoint.is_none() =>
                    {
                        return Err(anyhow::anyhow!(
                            "AWS_REGION or S3_ENDPOINT must be set when using the s3 object store"
                        ));
                    }
                    ObjectStoreProvider::Local if !is_set(&storage.local_storage_path) => {
                        return Err(anyhow::anyhow!(
                            "LOCAL_STORAGE_PATH must be set when using the local object store"
                        ));
                    }
                    _ => {}
                }
            }
            StorageBackend::TableStore => {
                if !is_set(&storage.table_name) {
                    return Err(anyhow::anyhow!(
                        "TABLE_NAME must be set when using the table store backend"
                    ));
                }
            }
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.base.environment
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.base.http_concurrency_limit
    }

    pub fn max_body_bytes(&self) -> usize {
        self.base.max_body_bytes
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.storage.backend
    }

    pub fn object_store_provider(&self) -> ObjectStoreProvider {
        self.storage.object_store_provider
    }

    pub fn bucket_name(&self) -> Option<&str> {
        self.storage.bucket_name.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.storage.local_storage_path.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.storage.s3_endpoint.as_deref()
    }

    pub fn table_name(&self) -> Option<&str> {
        self.storage.table_name.as_deref()
    }

    pub fn dynamodb_endpoint(&self) -> Option<&str> {
        self.storage.dynamodb_endpoint.as_deref()
    }

    pub fn aws_region(&self) -> Option<&str> {
        self.storage.aws_region.as_deref()
    }
}

fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(backend: StorageBackend, provider: ObjectStoreProvider) -> Config {
        Config {
            base: BaseConfig {
                server_port: SERVER_PORT,
                cors_origins: vec!["*".to_string()],
                environment: "development".to_string(),
                http_concurrency_limit: HTTP_CONCURRENCY_LIMIT,
                max_body_bytes: MAX_BODY_BYTES,
            },
            storage: StorageConfig {
                backend,
                object_store_provider: provider,
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
    fn test_memory_object_store_needs_no_namespace() {
        let cfg = config(StorageBackend::ObjectStore, ObjectStoreProvider::Memory);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_gcs_requires_bucket() {
        let mut cfg = config(StorageBackend::ObjectStore, ObjectStoreProvider::Gcs);
        assert!(cfg.validate().is_err());

        cfg.storage.bucket_name = Some("   ".to_string());
        assert!(cfg.validate().is_err());

        cfg.storage.bucket_name = Some("todos".to_string());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_s3_requires_region_or_endpoint() {
        let mut cfg = config(StorageBackend::ObjectStore, ObjectStoreProvider::S3);
        cfg.storage.bucket_name = Some("todos".to_string());
        assert!(cfg.validate().is_err());

        cfg.storage.s3_endpoint = Some("http://localhost:9000".to_string());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_local_requires_path() {
        let mut cfg = config(StorageBackend::ObjectStore, ObjectStoreProvider::Local);
        assert!(cfg.validate().is_err());
        cfg.storage.local_storage_path = Some("/tmp/todos".to_string());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_table_store_requires_table_name() {
        let mut cfg = config(StorageBackend::TableStore, ObjectStoreProvider::Gcs);
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("TABLE_NAME"));

        cfg.storage.table_name = Some("todos".to_string());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_wildcard_cors_rejected_in_production() {
        let mut cfg = config(StorageBackend::ObjectStore, ObjectStoreProvider::Memory);
        cfg.base.environment = "Production".to_string();
        assert!(cfg.is_production());
        assert!(cfg.validate().is_err());

        cfg.base.cors_origins = vec!["https://todo.example.com".to_string()];
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_zero_body_limit_rejected() {
        let mut cfg = config(StorageBackend::ObjectStore, ObjectStoreProvider::Memory);
        cfg.base.max_body_bytes = 0;
        assert!(cfg.validate().is_err());
    }
}
