//! Application state shared by all handlers.
//!
//! Built once at startup and shared through `Arc`; nothing in it is mutated
//! after construction.

use std::sync::Arc;

use tasklet_storage::Storage;

use crate::services::records::RecordService;

#[derive(Clone)]
pub struct AppState {
    pub records: RecordService,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            records: RecordService::new(storage),
        }
    }
}
