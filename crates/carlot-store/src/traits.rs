use async_trait::async_trait;
use bytes::Bytes;
use carlot_types::{Car, CarId};

use crate::error::StoreResult;

/// The table holding car records.
///
/// Implementations must satisfy these invariants:
/// - `id` is the sole key; `put` is an upsert.
/// - `delete` of an absent key is `Ok(())`, not an error.
/// - `list_all` returns the full set in no particular order.
/// - Backend failures are returned, never retried or swallowed.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Scan every record.
    async fn list_all(&self) -> StoreResult<Vec<Car>>;

    /// Insert or replace the record with `car.id`.
    async fn put(&self, car: &Car) -> StoreResult<()>;

    /// Remove the record with `id`, if present.
    async fn delete(&self, id: &CarId) -> StoreResult<()>;
}

/// Object storage for uploaded images.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `bytes` under `key`, tagged with `content_type`, and return a
    /// publicly retrievable location.
    ///
    /// An existing object with the same key is overwritten.
    async fn upload(&self, key: &str, content_type: &str, bytes: Bytes) -> StoreResult<String>;
}
