/// Reasons an attachment is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    /// No file was attached.
    #[error("no image file was attached")]
    MissingFile,

    /// The extension or declared MIME type is not an allowed image type.
    #[error("unsupported file type '{found}': only {allowed} images are accepted")]
    UnsupportedType { found: String, allowed: String },

    /// The file exceeds the configured size ceiling.
    #[error("file is too large: {size} bytes exceeds the {limit} byte limit")]
    FileTooLarge { size: u64, limit: u64 },
}

/// Result alias for gate evaluation.
pub type GateResult<T> = Result<T, GateError>;
