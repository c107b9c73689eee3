use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use calc_contract::ContractError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("state error: {0}")]
    State(#[from] calc_state::StateError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// A failed request, rendered as `{"error": .., "kind": ..}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub kind: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            kind: "internal",
            message: message.into(),
        }
    }
}

impl From<ContractError> for ApiError {
    fn from(err: ContractError) -> Self {
        let status = match &err {
            ContractError::InvalidArgument(_) | ContractError::UnknownFunction(_) => {
                StatusCode::BAD_REQUEST
            }
            ContractError::NotFound { .. } => StatusCode::NOT_FOUND,
            ContractError::Serialization(_) | ContractError::Deserialization { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ContractError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::warn!(kind = self.kind, error = %self.message, "request failed");
        }
        let body = Json(json!({ "error": self.message, "kind": self.kind }));
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_errors_map_to_statuses() {
        let cases = [
            (ContractError::InvalidArgument("x".into()), StatusCode::BAD_REQUEST),
            (ContractError::UnknownFunction("x".into()), StatusCode::BAD_REQUEST),
            (ContractError::NotFound { id: "x".into() }, StatusCode::NOT_FOUND),
            (
                ContractError::Deserialization {
                    id: "x".into(),
                    source: calc_types::TypeError::Decode("bad".into()),
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ContractError::Storage {
                    op: "read",
                    id: "x".into(),
                    source: calc_state::StateError::Unavailable("down".into()),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            let kind = err.kind();
            let api = ApiError::from(err);
            assert_eq!(api.status, status);
            assert_eq!(api.kind, kind);
        }
    }
}
