use calc_state::StateError;
use calc_types::TypeError;
use thiserror::Error;

/// Errors surfaced by contract transactions.
///
/// Every variant is terminal for the invocation; nothing is retried.
#[derive(Debug, Error)]
pub enum ContractError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unknown function: {0}")]
    UnknownFunction(String),

    #[error("failed to marshal calculation result: {0}")]
    Serialization(#[source] TypeError),

    #[error("failed to {op} world state for {id}: {source}")]
    Storage {
        op: &'static str,
        id: String,
        source: StateError,
    },

    #[error("calculation ID {id} does not exist")]
    NotFound { id: String },

    #[error("failed to unmarshal calculation result for {id}: {source}")]
    Deserialization { id: String, source: TypeError },
}

impl ContractError {
    /// Stable short code for hosts that map errors onto their own surface.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid_argument",
            Self::UnknownFunction(_) => "unknown_function",
            Self::Serialization(_) => "serialization",
            Self::Storage { .. } => "storage",
            Self::NotFound { .. } => "not_found",
            Self::Deserialization { .. } => "deserialization",
        }
    }
}

pub type ContractResult<T> = Result<T, ContractError>;
