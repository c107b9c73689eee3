use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use calc_contract::CalculatorContract;
use calc_state::WorldState;
use tower_http::trace::TraceLayer;

use crate::handler;

/// Contract handle shared by every request.
pub type SharedContract = Arc<CalculatorContract<Arc<dyn WorldState>>>;

/// Build the axum router with all calculator endpoints.
pub fn build_router(contract: SharedContract) -> Router {
    Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/info", get(handler::info_handler))
        .route("/v1/invoke", post(handler::invoke_handler))
        .route(
            "/v1/calculations/:id",
            get(handler::get_calculation_handler).post(handler::add_calculation_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(contract)
}
