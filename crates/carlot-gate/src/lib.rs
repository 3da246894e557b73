//! Upload gate for Carlot.
//!
//! Every image attachment passes through the [`UploadGate`] before it reaches
//! the blob store. The gate is a fail-fast pipeline of [`GateStage`]s:
//!
//! ```text
//!   Attachment ──> [Extension] ──> [MimeType] ──> [Size] ──> Accepted
//!                      │              │             │
//!                      ▼              ▼             ▼
//!                UnsupportedType UnsupportedType FileTooLarge
//! ```
//!
//! A missing attachment is rejected with [`GateError::MissingFile`] before
//! any stage runs. The gate never modifies the attachment.

pub mod config;
pub mod error;
pub mod gate;
pub mod stage;
pub mod stages;

pub use config::GateConfig;
pub use error::{GateError, GateResult};
pub use gate::UploadGate;
pub use stage::GateStage;
pub use stages::{ExtensionStage, MimeTypeStage, SizeStage};
