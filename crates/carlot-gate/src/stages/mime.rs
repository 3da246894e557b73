use carlot_types::Attachment;

use crate::config::GateConfig;
use crate::error::{GateError, GateResult};
use crate::stage::GateStage;

/// Rejects attachments whose declared MIME subtype is not on the allow-list.
pub struct MimeTypeStage;

impl GateStage for MimeTypeStage {
    fn name(&self) -> &str {
        "mime-type"
    }

    fn check(&self, attachment: &Attachment, config: &GateConfig) -> GateResult<()> {
        match attachment.mime_subtype() {
            Some(subtype) if config.allows(&subtype) => Ok(()),
            _ => Err(GateError::UnsupportedType {
                found: attachment.content_type.clone(),
                allowed: config.allowed_display(),
            }),
        }
    }
}
