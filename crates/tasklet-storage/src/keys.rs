//! Record id to object path mapping.
//!
//! The namespace is flat: a record id is the object name verbatim. Ids that
//! would create a nested path or a relative segment are rejected, as are ids
//! ending in `#<digits>`, which the local filesystem store reserves for its
//! own temporary files.

use crate::StorageError;
use object_store::path::Path;

pub fn record_path(id: &str) -> Result<Path, StorageError> {
    if id.is_empty() {
        return Err(StorageError::InvalidKey("record id is empty".to_string()));
    }
    if id.contains('/') {
        return Err(StorageError::InvalidKey(format!(
            "record id must not contain '/': {}",
            id
        )));
    }
    if has_reserved_suffix(id) {
        return Err(StorageError::InvalidKey(format!(
            "record id must not end in '#<digits>': {}",
            id
        )));
    }
    Path::parse(id).map_err(|e| StorageError::InvalidKey(format!("{}: {}", id, e)))
}

fn has_reserved_suffix(id: &str) -> bool {
    match id.rsplit_once('#') {
        Some((_, suffix)) => !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}
