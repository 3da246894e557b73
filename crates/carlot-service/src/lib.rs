//! Car catalog use cases.
//!
//! [`CarService`] is the stateless orchestrator between the HTTP layer and
//! the stores: it validates form fields, runs the upload gate, uploads the
//! image, then writes the record. Store handles are injected at construction
//! so tests can swap in the in-memory backends.

pub mod error;
pub mod service;

pub use error::{ServiceError, ServiceResult};
pub use service::CarService;

// Re-export key types
pub use carlot_gate::{GateConfig, GateError, UploadGate};
pub use carlot_store::{BlobStore, RecordStore, StoreError};
pub use carlot_types::{Attachment, Car, CarForm, CarId, Price};
