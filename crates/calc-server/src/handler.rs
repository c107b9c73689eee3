use axum::extract::{Path, State};
use axum::response::Json;
use calc_contract::{CalculationRecord, Invocation, FN_ADD, FN_GET_CALCULATION_RESULT};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::router::SharedContract;

/// Health check handler.
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Info handler. Reports the functions served and the contract settings in
/// effect.
pub async fn info_handler(State(contract): State<SharedContract>) -> Json<Value> {
    Json(json!({
        "name": "calc-server",
        "version": env!("CARGO_PKG_VERSION"),
        "functions": [FN_ADD, FN_GET_CALCULATION_RESULT],
        "contract": contract.config(),
    }))
}

/// Run a chaincode invocation. Responds with `{"payload": ..}`, where the
/// payload is the decoded JSON returned by the function or `null`.
pub async fn invoke_handler(
    State(contract): State<SharedContract>,
    Json(invocation): Json<Invocation>,
) -> Result<Json<Value>, ApiError> {
    let bytes = contract.invoke_request(&invocation)?;
    let payload = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).map_err(|e| ApiError::internal(e.to_string()))?
    };
    Ok(Json(json!({ "payload": payload })))
}

#[derive(Debug, Deserialize)]
pub struct AddRequest {
    pub operand1: f64,
    pub operand2: f64,
}

pub async fn add_calculation_handler(
    State(contract): State<SharedContract>,
    Path(id): Path<String>,
    Json(req): Json<AddRequest>,
) -> Result<Json<CalculationRecord>, ApiError> {
    let record = contract.add(&id, req.operand1, req.operand2)?;
    Ok(Json(record))
}

pub async fn get_calculation_handler(
    State(contract): State<SharedContract>,
    Path(id): Path<String>,
) -> Result<Json<CalculationRecord>, ApiError> {
    let record = contract.get_calculation_result(&id)?;
    Ok(Json(record))
}
