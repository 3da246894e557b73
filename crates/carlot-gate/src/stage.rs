use carlot_types::Attachment;

use crate::config::GateConfig;
use crate::error::GateResult;

/// A single check in the upload gate pipeline.
///
/// Stages are evaluated in order and the first failure stops evaluation.
/// The trait is object-safe and `Send + Sync` so stages can be stored in a
/// `Vec<Box<dyn GateStage>>`.
pub trait GateStage: Send + Sync {
    /// Human-readable name of this stage (e.g., "extension", "size").
    fn name(&self) -> &str;

    /// Check the attachment, returning the rejection reason on failure.
    fn check(&self, attachment: &Attachment, config: &GateConfig) -> GateResult<()>;
}
