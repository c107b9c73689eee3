//! HTTP host for the calculator chaincode.
//!
//! Stands in for the ledger peer: it owns the world state, builds a
//! [`CalculatorContract`](calc_contract::CalculatorContract) over it, and
//! forwards transaction invocations received over HTTP.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ApiError, ServerError, ServerResult};
pub use router::{build_router, SharedContract};
pub use server::CalcServer;
