//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p tasklet-api`. No external services
//! are needed; the object store runs in memory and the table store is an
//! in-process double with DynamoDB's delete semantics.

pub mod storage;

use axum_test::TestServer;
use std::sync::Arc;
use tasklet_api::setup::routes;
use tasklet_api::state::AppState;
use tasklet_core::{BaseConfig, Config, ObjectStoreProvider, StorageBackend, StorageConfig};
use tasklet_storage::{ObjectStorage, Storage};

pub fn test_config(backend: StorageBackend) -> Config {
    Config {
        base: BaseConfig {
            server_port: 0,
            cors_origins: vec!["*".to_string()],
            environment: "test".to_string(),
            http_concurrency_limit: 64,
            max_body_bytes: 65_536,
        },
        storage: StorageConfig {
            backend,
            object_store_provider: ObjectStoreProvider::Memory,
            bucket_name: None,
            local_storage_path: None,
            s3_endpoint: None,
            table_name: Some("records-test".to_string()),
            dynamodb_endpoint: None,
            aws_region: None,
        },
    }
}

/// Serve the full router over the given backend.
pub fn server_with(storage: Arc<dyn Storage>) -> TestServer {
    let config = test_config(storage.backend_type());
    let state = Arc::new(AppState::new(storage));
    let app = routes::setup_routes(&config, state).expect("Failed to build routes");
    TestServer::new(app.into_make_service()).expect("Failed to create test server")
}

/// Server over the in-memory object store.
pub fn object_store_server() -> TestServer {
    server_with(Arc::new(ObjectStorage::in_memory()))
}

/// Server over the table-store double.
pub fn table_store_server() -> TestServer {
    server_with(Arc::new(storage::MockTableStorage::default()))
}
