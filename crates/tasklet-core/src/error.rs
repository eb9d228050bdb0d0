//! Error types module
//!
//! All errors surfaced to HTTP callers are unified under `AppError`. Storage
//! failures are converted into `AppError::Storage` by the storage crate and
//! rendered as 500 with the backend's message; caller mistakes become
//! `AppError::InvalidInput` and render as 400.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "STORAGE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Client-facing message
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("Invalid request body: {}", err))
    }
}

impl AppError {
    /// Short variant name used as a structured log field.
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Storage(_) => "Storage",
        }
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        match self {
            AppError::InvalidInput(_) => 400,
            AppError::Storage(_) => 500,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::Storage(_) => "STORAGE_ERROR",
        }
    }

    fn client_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg) | AppError::Storage(msg) => msg.clone(),
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            AppError::InvalidInput(_) => LogLevel::Debug,
            AppError::Storage(_) => LogLevel::Error,
        }
    }
}
