use carlot_types::Attachment;

use crate::config::GateConfig;
use crate::error::{GateError, GateResult};
use crate::stage::GateStage;
use crate::stages::{ExtensionStage, MimeTypeStage, SizeStage};

/// The upload gate: a configurable pipeline of stages every attachment must
/// pass before it is handed to the blob store.
pub struct UploadGate {
    stages: Vec<Box<dyn GateStage>>,
    config: GateConfig,
}

impl UploadGate {
    /// Create a gate with an empty pipeline. Only presence is checked until
    /// stages are added with [`Self::add_stage`].
    pub fn new(config: GateConfig) -> Self {
        Self {
            stages: Vec::new(),
            config,
        }
    }

    /// Create a gate with the default pipeline:
    /// Extension -> MimeType -> Size
    pub fn with_default_stages(config: GateConfig) -> Self {
        let mut gate = Self::new(config);
        gate.add_stage(Box::new(ExtensionStage));
        gate.add_stage(Box::new(MimeTypeStage));
        gate.add_stage(Box::new(SizeStage));
        gate
    }

    /// Append a stage to the end of the pipeline.
    pub fn add_stage(&mut self, stage: Box<dyn GateStage>) {
        self.stages.push(stage);
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Number of stages in the pipeline.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Accept or reject an attachment.
    ///
    /// Fail-fast: the first failing stage decides the rejection reason. On
    /// success the attachment is returned untouched.
    pub fn admit(&self, attachment: Option<Attachment>) -> GateResult<Attachment> {
        let attachment = attachment.ok_or(GateError::MissingFile)?;

        for stage in &self.stages {
            if let Err(e) = stage.check(&attachment, &self.config) {
                tracing::debug!(
                    stage = stage.name(),
                    filename = %attachment.filename,
                    "Attachment rejected: {e}"
                );
                return Err(e);
            }
        }

        Ok(attachment)
    }
}

impl Default for UploadGate {
    fn default() -> Self {
        Self::with_default_stages(GateConfig::default())
    }
}

impl std::fmt::Debug for UploadGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.stages.iter().map(|s| s.name()).collect();
        f.debug_struct("UploadGate")
            .field("stages", &names)
            .field("config", &self.config)
            .finish()
    }
}
