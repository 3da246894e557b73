use carlot_types::Attachment;

use crate::config::GateConfig;
use crate::error::{GateError, GateResult};
use crate::stage::GateStage;

/// Rejects attachments larger than `max_file_size`.
pub struct SizeStage;

impl GateStage for SizeStage {
    fn name(&self) -> &str {
        "size"
    }

    fn check(&self, attachment: &Attachment, config: &GateConfig) -> GateResult<()> {
        let size = attachment.size();
        if size > config.max_file_size {
            return Err(GateError::FileTooLarge {
                size,
                limit: config.max_file_size,
            });
        }
        Ok(())
    }
}
