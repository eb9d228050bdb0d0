use crate::error::{ErrorResponse, HttpAppError};
use crate::services::records::DeleteOutcome;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tasklet_core::models::record::MISSING_ID_MESSAGE;
use tasklet_core::{AppError, Record};
use utoipa::ToSchema;

/// Body returned by a table-store delete.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteMessage {
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/records",
    tag = "records",
    responses(
        (status = 200, description = "All stored records", body = Vec<Record>),
        (status = 500, description = "Storage backend error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_records"))]
pub async fn list_records(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let records = state.records.handle_list().await?;
    tracing::debug!(count = records.len(), "Listed records");
    Ok(Json(records))
}

/// The body is taken as raw bytes so a malformed payload is reported through
/// the usual error body instead of axum's rejection text.
#[utoipa::path(
    post,
    path = "/records",
    tag = "records",
    request_body = Record,
    responses(
        (status = 201, description = "Record stored", body = Record),
        (status = 400, description = "Missing ID or malformed body", body = ErrorResponse),
        (status = 500, description = "Storage backend error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, body), fields(operation = "create_record", body_len = body.len()))]
pub async fn create_record(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<impl IntoResponse, HttpAppError> {
    let record = state.records.handle_create(&body).await?;
    tracing::info!(record_id = %record.id, "Record stored");
    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    delete,
    path = "/records/{id}",
    tag = "records",
    params(
        ("id" = String, Path, description = "Record ID")
    ),
    responses(
        (status = 204, description = "Record deleted (object store)"),
        (status = 200, description = "Record deleted (table store)", body = DeleteMessage),
        (status = 400, description = "Missing ID", body = ErrorResponse),
        (status = 500, description = "Storage backend error, including an absent id on the object store", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(record_id = %id, operation = "delete_record"))]
pub async fn delete_record(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, HttpAppError> {
    let outcome = state.records.handle_delete(&id).await?;
    tracing::info!(record_id = %id, "Record deleted");

    Ok(match outcome {
        DeleteOutcome::NoContent => StatusCode::NO_CONTENT.into_response(),
        DeleteOutcome::Deleted { message } => {
            (StatusCode::OK, Json(DeleteMessage { message })).into_response()
        }
    })
}

/// `DELETE /records/` with nothing after the slash.
#[tracing::instrument(fields(operation = "delete_record"))]
pub async fn delete_record_without_id() -> HttpAppError {
    tracing::debug!("Delete requested without an id");
    HttpAppError::from(AppError::InvalidInput(MISSING_ID_MESSAGE.to_string()))
}
