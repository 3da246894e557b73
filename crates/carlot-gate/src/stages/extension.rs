use carlot_types::Attachment;

use crate::config::GateConfig;
use crate::error::{GateError, GateResult};
use crate::stage::GateStage;

/// Rejects filenames whose extension is not on the allow-list.
pub struct ExtensionStage;

impl GateStage for ExtensionStage {
    fn name(&self) -> &str {
        "extension"
    }

    fn check(&self, attachment: &Attachment, config: &GateConfig) -> GateResult<()> {
        match attachment.extension() {
            Some(ext) if config.allows(&ext) => Ok(()),
            other => Err(GateError::UnsupportedType {
                found: other.unwrap_or_else(|| attachment.filename.clone()),
                allowed: config.allowed_display(),
            }),
        }
    }
}
