use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid price: {0:?} is not a number")]
    InvalidPrice(String),

    #[error("price must be greater than 0, got {0}")]
    NonPositivePrice(String),

    #[error("price {0} is outside the storable range")]
    PriceOutOfRange(String),
}
