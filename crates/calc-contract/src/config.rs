use calc_types::MAX_CALCULATION_ID_LEN;
use serde::{Deserialize, Serialize};

/// How `Add` treats NaN and infinite operands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonFinitePolicy {
    /// Refuse the call with `InvalidArgument` before computing anything.
    #[default]
    Reject,
    /// Compute the sum anyway and let encoding refuse the record, which
    /// surfaces as a serialization error.
    Defer,
}

/// Configuration for [`CalculatorContract`](crate::CalculatorContract).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Policy for NaN and infinite operands.
    pub non_finite: NonFinitePolicy,
    /// Maximum calculation ID length in bytes.
    pub max_id_len: usize,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            non_finite: NonFinitePolicy::Reject,
            max_id_len: MAX_CALCULATION_ID_LEN,
        }
    }
}
