use serde::ser::Error as _;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::value::RawValue;

use crate::error::TypeError;

/// Magnitudes in `[PLAIN_MIN, PLAIN_MAX)` are written as plain decimals;
/// everything else uses exponent form.
const PLAIN_MIN: f64 = 1e-6;
const PLAIN_MAX: f64 = 1e21;

/// The result of adding two operands, as persisted in world state.
///
/// Field order is part of the wire format: `operand1`, `operand2`, `result`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalculationRecord {
    #[serde(serialize_with = "serialize_number")]
    pub operand1: f64,
    #[serde(serialize_with = "serialize_number")]
    pub operand2: f64,
    #[serde(serialize_with = "serialize_number")]
    pub result: f64,
}

impl CalculationRecord {
    /// Build a record whose `result` is the IEEE-754 sum of the operands.
    ///
    /// NaN and infinities propagate; rejecting them is the caller's policy
    /// decision (encoding will refuse them either way).
    pub fn compute(operand1: f64, operand2: f64) -> Self {
        Self {
            operand1,
            operand2,
            result: operand1 + operand2,
        }
    }

    /// Encode to the canonical JSON wire form.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, TypeError> {
        for (field, value) in self.fields() {
            if !value.is_finite() {
                return Err(TypeError::NonFinite {
                    field,
                    value: value.to_string(),
                });
            }
        }
        serde_json::to_vec(self).map_err(|e| TypeError::Encode(e.to_string()))
    }

    /// Decode from the JSON wire form.
    ///
    /// All three fields are required and must be numbers; unknown fields are
    /// rejected.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, TypeError> {
        serde_json::from_slice(bytes).map_err(|e| TypeError::Decode(e.to_string()))
    }

    fn fields(&self) -> [(&'static str, f64); 3] {
        [
            ("operand1", self.operand1),
            ("operand2", self.operand2),
            ("result", self.result),
        ]
    }
}

/// Render a finite value the way existing ledger writers do: shortest
/// round-tripping digits, plain decimal inside `[1e-6, 1e21)` (`5`,
/// `10000000000000000`, `0.25`) and exponent form with a signed exponent
/// outside it (`1e+21`, `1.5e-7`).
fn format_number(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude == 0.0 || (PLAIN_MIN..PLAIN_MAX).contains(&magnitude) {
        return format!("{value}");
    }
    let exp = format!("{value:e}");
    match exp.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => exp,
    }
}

/// Written as a raw JSON number so the exact rendering of
/// [`format_number`] reaches the output.
fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if !value.is_finite() {
        return Err(S::Error::custom(format!("{value} is not a finite number")));
    }
    let raw = RawValue::from_string(format_number(*value)).map_err(S::Error::custom)?;
    raw.serialize(serializer)
}
