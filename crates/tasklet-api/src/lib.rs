//! Tasklet API Library
//!
//! This crate provides the HTTP handlers, the record service, and application setup.

// Module declarations
mod api_doc;
pub mod constants;
mod handlers;
pub mod setup;
mod telemetry;

// Public modules
pub mod error;
pub mod services;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use services::records::{DeleteOutcome, RecordService};
pub use state::AppState;
