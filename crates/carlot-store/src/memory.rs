use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use bytes::Bytes;
use carlot_types::{Car, CarId};

use crate::error::{StoreError, StoreResult};
use crate::traits::{BlobStore, RecordStore};

/// In-memory, HashMap-based record store.
///
/// Intended for tests and local runs. Records are held behind a `RwLock` and
/// cloned on read. Every trait call is counted. The store can be switched
/// into an "unavailable" mode where every call fails, or told to fail the
/// deletion of particular ids only.
pub struct InMemoryRecordStore {
    records: RwLock<HashMap<CarId, Car>>,
    unavailable: AtomicBool,
    failing_deletes: RwLock<HashSet<CarId>>,
    scans: AtomicUsize,
    puts: AtomicUsize,
    deletes: AtomicUsize,
}

impl InMemoryRecordStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            unavailable: AtomicBool::new(false),
            failing_deletes: RwLock::new(HashSet::new()),
            scans: AtomicUsize::new(0),
            puts: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
        }
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.records.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.read().expect("lock poisoned").is_empty()
    }

    /// Look up a single record without counting it as a scan.
    pub fn get(&self, id: &CarId) -> Option<Car> {
        self.records.read().expect("lock poisoned").get(id).cloned()
    }

    /// Make every subsequent call fail with [`StoreError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Make every subsequent deletion of `id` fail with
    /// [`StoreError::Unavailable`]. Other ids are unaffected.
    pub fn fail_deletes_of(&self, id: CarId) {
        self.failing_deletes.write().expect("lock poisoned").insert(id);
    }

    pub fn scan_count(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }

    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn delete_count(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    fn check_available(&self, operation: &str) -> StoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable(operation, "in-memory table offline"));
        }
        Ok(())
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn list_all(&self) -> StoreResult<Vec<Car>> {
        self.scans.fetch_add(1, Ordering::SeqCst);
        self.check_available("scan")?;
        let map = self.records.read().expect("lock poisoned");
        Ok(map.values().cloned().collect())
    }

    async fn put(&self, car: &Car) -> StoreResult<()> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.check_available("put")?;
        let mut map = self.records.write().expect("lock poisoned");
        map.insert(car.id.clone(), car.clone());
        Ok(())
    }

    async fn delete(&self, id: &CarId) -> StoreResult<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.check_available("delete")?;
        if self.failing_deletes.read().expect("lock poisoned").contains(id) {
            return Err(StoreError::unavailable("delete", format!("in-memory delete of {id} refused")));
        }
        let mut map = self.records.write().expect("lock poisoned");
        map.remove(id);
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryRecordStore")
            .field("record_count", &self.len())
            .finish()
    }
}

/// In-memory blob store.
///
/// Locations are reported as `"{base_url}/{key}"`.
pub struct InMemoryBlobStore {
    base_url: String,
    blobs: RwLock<HashMap<String, (String, Bytes)>>,
    unavailable: AtomicBool,
    uploads: AtomicUsize,
}

impl InMemoryBlobStore {
    pub const DEFAULT_BASE_URL: &'static str = "memory://carlot";

    /// Create a new empty store with the default base URL.
    pub fn new() -> Self {
        Self::with_base_url(Self::DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            blobs: RwLock::new(HashMap::new()),
            unavailable: AtomicBool::new(false),
            uploads: AtomicUsize::new(0),
        }
    }

    /// Bytes stored under `key`.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        self.blobs
            .read()
            .expect("lock poisoned")
            .get(key)
            .map(|(_, bytes)| bytes.clone())
    }

    /// Content type recorded for `key`.
    pub fn content_type(&self, key: &str) -> Option<String> {
        self.blobs
            .read()
            .expect("lock poisoned")
            .get(key)
            .map(|(content_type, _)| content_type.clone())
    }

    pub fn len(&self) -> usize {
        self.blobs.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.read().expect("lock poisoned").is_empty()
    }

    /// Make every subsequent upload fail with [`StoreError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn upload(&self, key: &str, content_type: &str, bytes: Bytes) -> StoreResult<String> {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("upload", "in-memory bucket offline"));
        }
        self.blobs
            .write()
            .expect("lock poisoned")
            .insert(key.to_string(), (content_type.to_string(), bytes));
        Ok(format!("{}/{}", self.base_url, key))
    }
}

impl std::fmt::Debug for InMemoryBlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryBlobStore")
            .field("base_url", &self.base_url)
            .field("blob_count", &self.len())
            .finish()
    }
}
