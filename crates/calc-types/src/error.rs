use thiserror::Error;

/// Errors produced by type construction and the record codec.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid calculation ID {id:?}: {reason}")]
    InvalidCalculationId { id: String, reason: String },

    #[error("field {field} is not a finite number: {value}")]
    NonFinite { field: &'static str, value: String },

    #[error("failed to encode calculation record: {0}")]
    Encode(String),

    #[error("failed to decode calculation record: {0}")]
    Decode(String),
}
