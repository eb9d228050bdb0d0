use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Storage backend types
///
/// Selects which persistence family holds the records. It's defined in core
/// because both configuration and the HTTP layer branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// One object per record in a flat bucket namespace.
    ObjectStore,
    /// One row per record in a key-value table.
    TableStore,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "object" | "object-store" | "bucket" => Ok(StorageBackend::ObjectStore),
            "table" | "table-store" | "dynamodb" => Ok(StorageBackend::TableStore),
            _ => Err(anyhow::anyhow!("Invalid storage backend: {}", s)),
        }
    }
}

impl Display for StorageBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageBackend::ObjectStore => write!(f, "object-store"),
            StorageBackend::TableStore => write!(f, "table-store"),
        }
    }
}

/// Object store providers usable behind the object-store backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectStoreProvider {
    S3,
    Gcs,
    Local,
    Memory,
}

impl ObjectStoreProvider {
    /// Whether the provider needs a bucket name (as opposed to a directory or nothing).
    pub fn requires_bucket(&self) -> bool {
        matches!(self, ObjectStoreProvider::S3 | ObjectStoreProvider::Gcs)
    }
}

impl FromStr for ObjectStoreProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "s3" => Ok(ObjectStoreProvider::S3),
            "gcs" | "gcp" => Ok(ObjectStoreProvider::Gcs),
            "local" => Ok(ObjectStoreProvider::Local),
            "memory" => Ok(ObjectStoreProvider::Memory),
            _ => Err(anyhow::anyhow!("Invalid object store provider: {}", s)),
        }
    }
}

impl Display for ObjectStoreProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ObjectStoreProvider::S3 => write!(f, "s3"),
            ObjectStoreProvider::Gcs => write!(f, "gcs"),
            ObjectStoreProvider::Local => write!(f, "local"),
            ObjectStoreProvider::Memory => write!(f, "memory"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_backend_aliases() {
        assert_eq!(
            "object".parse::<StorageBackend>().unwrap(),
            StorageBackend::ObjectStore
        );
        assert_eq!(
            "DynamoDB".parse::<StorageBackend>().unwrap(),
            StorageBackend::TableStore
        );
        assert_eq!(
            "table-store".parse::<StorageBackend>().unwrap(),
            StorageBackend::TableStore
        );
        assert!("postgres".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_storage_backend_display_parses_back() {
        for backend in [StorageBackend::ObjectStore, StorageBackend::TableStore] {
            assert_eq!(backend.to_string().parse::<StorageBackend>().unwrap(), backend);
        }
    }

    #[test]
    fn test_object_store_provider_parsing() {
        assert_eq!(
            "gcp".parse::<ObjectStoreProvider>().unwrap(),
            ObjectStoreProvider::Gcs
        );
        assert_eq!(
            " S3 ".parse::<ObjectStoreProvider>().unwrap(),
            ObjectStoreProvider::S3
        );
        assert!("azure".parse::<ObjectStoreProvider>().is_err());
        assert!(ObjectStoreProvider::Gcs.requires_bucket());
        assert!(!ObjectStoreProvider::Memory.requires_bucket());
    }
}
