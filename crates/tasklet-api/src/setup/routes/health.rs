//! Health check handlers and response types.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(5);

#[derive(serde::Serialize)]
pub(super) struct HealthCheckResponse {
    pub status: String,
    pub storage: String,
    pub backend: String,
}

/// Liveness probe - process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Storage probe with a timeout; 503 when the backend cannot be reached.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let storage = state.records.storage().clone();

    let storage_status = match tokio::time::timeout(TIMEOUT, storage.health_check()).await {
        Ok(Ok(())) => "healthy".to_string(),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Storage health check failed");
            format!("unhealthy: {}", e)
        }
        Err(_) => {
            tracing::error!("Storage health check timed out");
            "timeout".to_string()
        }
    };

    let healthy = storage_status == "healthy";
    let response = HealthCheckResponse {
        status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
        storage: storage_status,
        backend: storage.backend_type().to_string(),
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
