//! Foundation types for the calculator chaincode.
//!
//! Every other crate in the workspace depends on `calc-types`.
//!
//! # Key Types
//!
//! - [`CalculationRecord`] -- operands and their sum, as stored in world state
//! - [`CalculationId`] -- validated caller-supplied world-state key
//!
//! # Wire Format
//!
//! Records are stored as a JSON object with exactly three numeric fields in
//! fixed order: `{"operand1":2,"operand2":3,"result":5}`. Field names and the
//! integral-number form are fixed so records written by earlier deployments
//! decode and re-encode byte-for-byte.

pub mod error;
pub mod id;
pub mod record;

pub use error::TypeError;
pub use id::{CalculationId, MAX_CALCULATION_ID_LEN};
pub use record::CalculationRecord;
