use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Missing or malformed form field.
    #[error("{0}")]
    Validation(String),

    /// The attachment was refused by the upload gate.
    #[error("{0}")]
    Rejected(#[from] carlot_gate::GateError),

    /// A backend call failed.
    #[error("{0}")]
    Storage(#[from] carlot_store::StoreError),
}

impl ServiceError {
    /// `true` when the caller's input is at fault (HTTP 400), `false` for
    /// backend failures (HTTP 500).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Rejected(_))
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
