//! Storage backends for Carlot.
//!
//! Two independent stores back the application:
//!
//! - [`RecordStore`] -- the key-value table holding car metadata, keyed by
//!   [`CarId`](carlot_types::CarId)
//! - [`BlobStore`] -- object storage holding the uploaded images
//!
//! # Backends
//!
//! - [`InMemoryRecordStore`] / [`InMemoryBlobStore`] -- `HashMap`-based
//!   stores for tests and local runs
//! - `aws::DynamoRecordStore` / `aws::S3BlobStore` -- production backends
//!   (feature `aws`, enabled by default)
//!
//! # Design Rules
//!
//! 1. No retries. A failed call surfaces as [`StoreError::Unavailable`].
//! 2. No caching. Every call is a fresh round trip to the backend.
//! 3. Deleting an absent key succeeds.
//! 4. Blob keys are used verbatim; writing an existing key overwrites it.

#[cfg(feature = "aws")]
pub mod aws;
pub mod error;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::{InMemoryBlobStore, InMemoryRecordStore};
pub use traits::{BlobStore, RecordStore};
