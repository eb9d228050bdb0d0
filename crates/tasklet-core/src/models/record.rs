use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppError;

/// Message returned when a record arrives without an id.
pub const MISSING_ID_MESSAGE: &str = "Missing ID";

/// A todo item.
///
/// `id` is assigned by the client and doubles as the storage key (object name
/// or table primary key). Records are immutable once written; a second write
/// with the same id replaces the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Record {
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing ID"))]
    #[schema(example = "1")]
    pub id: String,
    #[serde(default)]
    #[schema(example = "buy milk")]
    pub task: String,
}

impl Record {
    pub fn new(id: impl Into<String>, task: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            task: task.into(),
        }
    }

    /// Decode a request body into a record.
    ///
    /// Fails with `AppError::InvalidInput` when the body is not JSON of the
    /// record shape or when the id is empty.
    pub fn from_json_body(body: &[u8]) -> Result<Self, AppError> {
        let record: Record = serde_json::from_slice(body)?;
        record.ensure_valid()?;
        Ok(record)
    }

    pub fn ensure_valid(&self) -> Result<(), AppError> {
        self.validate()
            .map_err(|_| AppError::InvalidInput(MISSING_ID_MESSAGE.to_string()))
    }
}
