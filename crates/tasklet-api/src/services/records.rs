//! Record service
//!
//! Sits between the HTTP handlers and the configured storage backend. It
//! validates caller input, delegates to the backend, and turns every failure
//! into an `AppError` so handlers render errors the same way for both
//! backend families.

use std::sync::Arc;

use tasklet_core::models::record::MISSING_ID_MESSAGE;
use tasklet_core::{AppError, Record, StorageBackend};
use tasklet_storage::Storage;

use crate::constants::RECORD_DELETED_MESSAGE;

/// How a successful delete is reported to the caller.
///
/// The object-store variant answers with an empty 204 and the table-store
/// variant with a 200 carrying a message; both shapes are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    NoContent,
    Deleted { message: String },
}

#[derive(Clone)]
pub struct RecordService {
    storage: Arc<dyn Storage>,
}

impl RecordService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub fn backend_type(&self) -> StorageBackend {
        self.storage.backend_type()
    }

    /// List every record, freshly read from the backend.
    pub async fn handle_list(&self) -> Result<Vec<Record>, AppError> {
        self.storage.list().await.map_err(|e| {
            tracing::error!(error = %e, backend = %self.backend_type(), "Error listing records");
            AppError::from(e)
        })
    }

    /// Decode a create body and upsert the record.
    pub async fn handle_create(&self, raw_body: &[u8]) -> Result<Record, AppError> {
        let record = Record::from_json_body(raw_body).inspect_err(|e| {
            tracing::debug!(error = %e, "Rejected record body");
        })?;

        let id = record.id.clone();
        self.storage.put(record).await.map_err(|e| {
            tracing::error!(error = %e, record_id = %id, backend = %self.backend_type(), "Error writing record");
            AppError::from(e)
        })
    }

    pub async fn handle_delete(&self, id: &str) -> Result<DeleteOutcome, AppError> {
        if id.is_empty() {
            tracing::debug!("Missing ID in the request URL");
            return Err(AppError::InvalidInput(MISSING_ID_MESSAGE.to_string()));
        }

        self.storage.delete(id).await.map_err(|e| {
            tracing::error!(error = %e, record_id = %id, backend = %self.backend_type(), "Error deleting record");
            AppError::from(e)
        })?;

        Ok(match self.backend_type() {
            StorageBackend::ObjectStore => DeleteOutcome::NoContent,
            StorageBackend::TableStore => DeleteOutcome::Deleted {
                message: RECORD_DELETED_MESSAGE.to_string(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasklet_core::ErrorMetadata;
    use tasklet_storage::ObjectStorage;

    fn service() -> RecordService {
        RecordService::new(Arc::new(ObjectStorage::in_memory()))
    }

    #[tokio::test]
    async fn test_list_empty_is_empty_vec() {
        let records = service().handle_list().await.unwrap();
        assert!(records.is_empty());
        assert_eq!(serde_json::to_string(&records).unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let service = service();
        let created = service
            .handle_create(br#"{"id":"1","task":"buy milk"}"#)
            .await
            .unwrap();
        assert_eq!(created, Record::new("1", "buy milk"));

        let records = service.handle_list().await.unwrap();
        assert_eq!(records, vec![created]);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_id() {
        let err = service()
            .handle_create(br#"{"id":"","task":"buy milk"}"#)
            .await
            .unwrap_err();
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.client_message(), MISSING_ID_MESSAGE);
    }

    #[tokio::test]
    async fn test_create_rejects_malformed_json() {
        let err = service().handle_create(b"{\"id\":").await.unwrap_err();
        assert_eq!(err.http_status_code(), 400);
    }

    #[tokio::test]
    async fn test_delete_rejects_empty_id() {
        let err = service().handle_delete("").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_object_store_delete_is_no_content() {
        let service = service();
        service
            .handle_create(br#"{"id":"1","task":"buy milk"}"#)
            .await
            .unwrap();

        let outcome = service.handle_delete("1").await.unwrap();
        assert_eq!(outcome, DeleteOutcome::NoContent);
        assert!(service.handle_list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_object_store_delete_absent_is_storage_error() {
        let err = service().handle_delete("missing").await.unwrap_err();
        assert_eq!(err.http_status_code(), 500);
        assert!(err.client_message().contains("missing"));
    }
}
