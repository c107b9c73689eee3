/// Errors from world-state operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// The backend could not serve the request.
    #[error("world state unavailable: {0}")]
    Unavailable(String),

    /// A KYC-checked write was submitted by an unverified identity.
    #[error("identity {identity:?} has not passed KYC verification")]
    KycRejected { identity: String },

    /// World-state keys must be non-empty.
    #[error("world-state key must not be empty")]
    EmptyKey,

    /// Serialization or deserialization of the backing document failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for world-state operations.
pub type StateResult<T> = Result<T, StateError>;
