//! Route configuration and setup.
//!
//! Record routes are mounted under both `/records` and the older `/todos`
//! path; health checks live in [health](health).

mod health;

use crate::constants::{LEGACY_TODOS_PATH, RECORDS_PATH};
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{delete, get},
    Json, Router,
};
use std::sync::Arc;
use tasklet_core::Config;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let http_concurrency_limit = config.http_concurrency_limit().max(1);
    tracing::info!(
        http_concurrency_limit = http_concurrency_limit,
        max_body_bytes = config.max_body_bytes(),
        "HTTP limits enabled"
    );

    let app = Router::new()
        .merge(record_routes(RECORDS_PATH))
        .merge(record_routes(LEGACY_TODOS_PATH))
        .merge(health_routes())
        .route(
            "/api/openapi.json",
            get(|| async { Json(crate::api_doc::ApiDoc::openapi()) }),
        )
        .with_state(state)
        .merge(RapiDoc::new("/api/openapi.json").path("/docs"))
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes()))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

fn record_routes(base: &str) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            base,
            get(handlers::records::list_records).post(handlers::records::create_record),
        )
        .route(
            &format!("{}/", base),
            delete(handlers::records::delete_record_without_id),
        )
        .route(
            &format!("{}/{{id}}", base),
            delete(handlers::records::delete_record),
        )
}

fn health_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [Method::GET, Method::POST, Method::DELETE, Method::OPTIONS];
    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", o, e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    };
    Ok(cors)
}
