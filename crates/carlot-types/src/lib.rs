//! Foundation types for Carlot.
//!
//! Every other Carlot crate depends on `carlot-types`.
//!
//! # Key Types
//!
//! - [`Car`] — A persisted catalog record
//! - [`CarId`] — Opaque record key (UUID v4 string)
//! - [`Price`] — Strictly positive, finite price
//! - [`CarForm`] — Raw, unvalidated form fields for a new record
//! - [`Attachment`] — An inbound file part (filename, MIME type, bytes)

pub mod attachment;
pub mod car;
pub mod error;
pub mod price;

pub use attachment::Attachment;
pub use car::{Car, CarForm, CarId};
pub use error::TypeError;
pub use price::Price;
