use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Default upper bound on the byte length of a calculation ID.
pub const MAX_CALCULATION_ID_LEN: usize = 256;

/// Caller-supplied key under which a calculation record is stored.
///
/// The record itself carries no identifier; the ID only exists as the
/// world-state key. Valid IDs are non-empty, bounded in length, and free of
/// ASCII control characters so they can be logged and used as map keys
/// without escaping surprises.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalculationId(String);

impl CalculationId {
    /// Validate `raw` against the default length limit.
    pub fn new(raw: impl Into<String>) -> Result<Self, TypeError> {
        Self::with_max_len(raw, MAX_CALCULATION_ID_LEN)
    }

    /// Validate `raw` against an explicit length limit (in bytes).
    pub fn with_max_len(raw: impl Into<String>, max_len: usize) -> Result<Self, TypeError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(invalid(raw, "must not be empty".into()));
        }
        if raw.len() > max_len {
            let reason = format!("length {} exceeds limit of {max_len} bytes", raw.len());
            return Err(invalid(raw, reason));
        }
        if let Some(ch) = raw.chars().find(|c| c.is_ascii_control()) {
            let reason = format!("contains control character {ch:?}");
            return Err(invalid(raw, reason));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

fn invalid(id: String, reason: String) -> TypeError {
    TypeError::InvalidCalculationId { id, reason }
}

impl fmt::Display for CalculationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CalculationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CalculationId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CalculationId {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CalculationId> for String {
    fn from(id: CalculationId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_ids() {
        let id = CalculationId::new("calc-1").unwrap();
        assert_eq!(id.as_str(), "calc-1");
        assert_eq!(id.to_string(), "calc-1");
    }

    #[test]
    fn accepts_unicode_and_spaces() {
        assert!(CalculationId::new("résultat 42").is_ok());
    }

    #[test]
    fn rejects_empty() {
        let err = CalculationId::new("").unwrap_err();
        assert!(matches!(err, TypeError::InvalidCalculationId { .. }));
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn rejects_control_characters() {
        assert!(CalculationId::new("calc\n1").is_err());
        assert!(CalculationId::new("calc\u{0}1").is_err());
    }

    #[test]
    fn enforces_length_limit() {
        let at_limit = "a".repeat(MAX_CALCULATION_ID_LEN);
        assert!(CalculationId::new(at_limit).is_ok());

        let over = "a".repeat(MAX_CALCULATION_ID_LEN + 1);
        assert!(CalculationId::new(over).is_err());
    }

    #[test]
    fn custom_length_limit() {
        assert!(CalculationId::with_max_len("abcd", 4).is_ok());
        assert!(CalculationId::with_max_len("abcde", 4).is_err());
    }

    #[test]
    fn parse_from_str() {
        let id: CalculationId = "calc-7".parse().unwrap();
        assert_eq!(id.into_inner(), "calc-7");
    }

    #[test]
    fn serde_is_transparent_and_validated() {
        let id = CalculationId::new("calc-9").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"calc-9\"");

        let back: CalculationId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);

        assert!(serde_json::from_str::<CalculationId>("\"\"").is_err());
    }
}
