//! Tasklet Storage Library
//!
//! This crate provides the record storage abstraction and its two backend
//! families:
//!
//! - **Object store** (`ObjectStorage`): one JSON object per record in a flat
//!   bucket namespace, named by the record id. Listing enumerates the bucket
//!   and reads every object; the enumeration is paginated by the provider.
//! - **Table store** (`TableStorage`): one DynamoDB row per record, keyed by
//!   `id`. Listing is a full table scan.
//!
//! Both implement [`Storage`], so the HTTP layer never knows which one is in
//! use except through [`Storage::backend_type`]. The two backends disagree on
//! deleting an absent id (object store: `NotFound` error, table store:
//! success); that difference is deliberate and is not smoothed over here.

pub mod factory;
#[cfg(feature = "storage-object")]
pub(crate) mod keys;
#[cfg(feature = "storage-object")]
pub mod object;
#[cfg(feature = "storage-table")]
pub mod table;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-object")]
pub use object::ObjectStorage;
#[cfg(feature = "storage-table")]
pub use table::TableStorage;
pub use tasklet_core::StorageBackend;
pub use traits::{Storage, StorageError, StorageResult};
