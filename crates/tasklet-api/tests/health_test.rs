//! Health and documentation endpoint tests.

// Shared with records_test; not every helper is used here.
#[allow(dead_code)]
mod helpers;

use axum::http::StatusCode;
use helpers::storage::FailingStorage;
use serde_json::Value;
use std::sync::Arc;

#[tokio::test]
async fn test_health_reports_backend() {
    let server = helpers::object_store_server();

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"], "healthy");
    assert_eq!(body["backend"], "object-store");
}

#[tokio::test]
async fn test_health_unreachable_backend_returns_503() {
    let server = helpers::server_with(Arc::new(FailingStorage));

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.json::<Value>()["status"], "unhealthy");
}

#[tokio::test]
async fn test_liveness() {
    let server = helpers::table_store_server();

    let response = server.get("/live").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["status"], "alive");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let server = helpers::object_store_server();

    let response = server.get("/api/openapi.json").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert!(body["paths"]["/records"].is_object());
    assert!(body["paths"]["/records/{id}"].is_object());
}
