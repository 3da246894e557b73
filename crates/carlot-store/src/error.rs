/// Errors from record and blob store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend call failed (network, permissions, throttling, ...).
    #[error("storage unavailable during {operation}: {message}")]
    Unavailable { operation: String, message: String },

    /// A stored item could not be decoded into a car record.
    #[error("malformed record: {0}")]
    MalformedRecord(String),
}

impl StoreError {
    /// Build an [`StoreError::Unavailable`] from any displayable backend error.
    pub fn unavailable(operation: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Unavailable {
            operation: operation.into(),
            message: err.to_string(),
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
