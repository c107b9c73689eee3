use std::sync::Arc;

use calc_contract::CalculatorContract;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::{build_router, SharedContract};

/// Calculator chaincode host.
pub struct CalcServer {
    config: ServerConfig,
    contract: SharedContract,
}

impl CalcServer {
    /// Open the configured world state and build the contract over it.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let state = config.open_state()?;
        let contract = Arc::new(CalculatorContract::with_config(
            state,
            config.contract.clone(),
        ));
        Ok(Self { config, contract })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn contract(&self) -> &SharedContract {
        &self.contract
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(Arc::clone(&self.contract))
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("calc server listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
