//! Built-in gate stages.

pub mod extension;
pub mod mime;
pub mod size;

pub use extension::ExtensionStage;
pub use mime::MimeTypeStage;
pub use size::SizeStage;
