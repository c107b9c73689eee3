//! Calculator chaincode.
//!
//! [`CalculatorContract`] exposes two transactions against an injected
//! [`WorldState`](calc_state::WorldState):
//!
//! - `Add(calculationID, operand1, operand2)` -- sum the operands and store
//!   the [`CalculationRecord`] under the ID
//! - `GetCalculationResult(calculationID)` -- read the record back
//!
//! Both are reachable as typed methods and through the string-argument
//! [`CalculatorContract::invoke`] dispatcher that ledger hosts call.
//!
//! Records are written with `put_state_without_kyc`: this contract
//! deliberately skips the platform's identity check on writes.

pub mod config;
pub mod contract;
pub mod error;
pub mod invoke;

pub use config::{ContractConfig, NonFinitePolicy};
pub use contract::CalculatorContract;
pub use error::{ContractError, ContractResult};
pub use invoke::{Invocation, FN_ADD, FN_GET_CALCULATION_RESULT};

pub use calc_types::{CalculationId, CalculationRecord};
