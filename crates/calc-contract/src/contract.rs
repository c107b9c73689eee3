use calc_state::WorldState;
use calc_types::{CalculationId, CalculationRecord};
use tracing::{debug, warn};

use crate::config::{ContractConfig, NonFinitePolicy};
use crate::error::{ContractError, ContractResult};

/// The calculator contract.
///
/// Holds nothing but its world-state handle and configuration. Each call is
/// a single request/response; concurrency control belongs to the state.
pub struct CalculatorContract<S> {
    state: S,
    config: ContractConfig,
}

impl<S: WorldState> CalculatorContract<S> {
    pub fn new(state: S) -> Self {
        Self::with_config(state, ContractConfig::default())
    }

    pub fn with_config(state: S, config: ContractConfig) -> Self {
        Self { state, config }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn config(&self) -> &ContractConfig {
        &self.config
    }

    /// Add `operand1` and `operand2` and store the record under
    /// `calculation_id`, replacing any earlier record with that ID.
    ///
    /// The write bypasses KYC verification.
    pub fn add(
        &self,
        calculation_id: &str,
        operand1: f64,
        operand2: f64,
    ) -> ContractResult<CalculationRecord> {
        let id = self.parse_id(calculation_id)?;
        if self.config.non_finite == NonFinitePolicy::Reject {
            check_finite("operand1", operand1)?;
            check_finite("operand2", operand2)?;
        }

        let record = CalculationRecord::compute(operand1, operand2);
        let bytes = record
            .to_json_bytes()
            .map_err(ContractError::Serialization)?;

        self.state
            .put_state_without_kyc(id.as_str(), &bytes)
            .map_err(|source| {
                warn!(id = %id, error = %source, "world state write failed");
                ContractError::Storage {
                    op: "write",
                    id: id.to_string(),
                    source,
                }
            })?;

        debug!(id = %id, result = record.result, "calculation stored");
        Ok(record)
    }

    /// Read and decode the record stored under `calculation_id`.
    ///
    /// The stored `result` is returned as-is; it is not recomputed.
    pub fn get_calculation_result(&self, calculation_id: &str) -> ContractResult<CalculationRecord> {
        let id = self.parse_id(calculation_id)?;

        let bytes = self
            .state
            .get_state(id.as_str())
            .map_err(|source| {
                warn!(id = %id, error = %source, "world state read failed");
                ContractError::Storage {
                    op: "read",
                    id: id.to_string(),
                    source,
                }
            })?
            .ok_or_else(|| ContractError::NotFound { id: id.to_string() })?;

        let record = CalculationRecord::from_json_bytes(&bytes).map_err(|source| {
            ContractError::Deserialization {
                id: id.to_string(),
                source,
            }
        })?;

        debug!(id = %id, "calculation read");
        Ok(record)
    }

    fn parse_id(&self, raw: &str) -> ContractResult<CalculationId> {
        CalculationId::with_max_len(raw, self.config.max_id_len)
            .map_err(|e| ContractError::InvalidArgument(e.to_string()))
    }
}

fn check_finite(name: &str, value: f64) -> ContractResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ContractError::InvalidArgument(format!(
            "{name} must be a finite number, got {value}"
        )))
    }
}

impl<S> std::fmt::Debug for CalculatorContract<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalculatorContract")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use calc_state::{InMemoryWorldState, KycVerifier, StateResult};
    use proptest::prelude::*;

    fn contract() -> CalculatorContract<InMemoryWorldState> {
        CalculatorContract::new(InMemoryWorldState::new())
    }

    /// Verifier that counts how often it is consulted.
    #[derive(Clone, Default)]
    struct CountingKyc(Arc<AtomicUsize>);

    impl KycVerifier for CountingKyc {
        fn is_verified(&self, _identity: &str) -> StateResult<bool> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(false)
        }
    }

    // -----------------------------------------------------------------------
    // Add
    // -----------------------------------------------------------------------

    #[test]
    fn add_stores_canonical_record() {
        let c = contract();
        let record = c.add("calc-1", 2.0, 3.0).unwrap();
        assert_eq!(record, CalculationRecord::compute(2.0, 3.0));

        let stored = c.state().get_state("calc-1").unwrap().unwrap();
        assert_eq!(stored, br#"{"operand1":2,"operand2":3,"result":5}"#.to_vec());
    }

    #[test]
    fn add_then_get() {
        let c = contract();
        c.add("calc-1", 2.0, 3.0).unwrap();
        let r = c.get_calculation_result("calc-1").unwrap();
        assert_eq!(r.operand1, 2.0);
        assert_eq!(r.operand2, 3.0);
        assert_eq!(r.result, 5.0);
    }

    #[test]
    fn add_overwrites_previous_record() {
        let c = contract();
        c.add("calc-1", 1.0, 1.0).unwrap();
        c.add("calc-1", 10.0, 0.5).unwrap();

        let r = c.get_calculation_result("calc-1").unwrap();
        assert_eq!(r, CalculationRecord::compute(10.0, 0.5));
        assert_eq!(c.state().len(), 1);
    }

    #[test]
    fn add_bypasses_kyc() {
        let calls = CountingKyc::default();
        let c = CalculatorContract::new(InMemoryWorldState::with_kyc(calls.clone()));
        c.add("calc-1", 4.0, 4.0).unwrap();

        assert_eq!(calls.0.load(Ordering::SeqCst), 0);
        assert!(c.get_calculation_result("calc-1").is_ok());
    }

    #[test]
    fn add_rejects_invalid_ids() {
        let c = contract();
        let err = c.add("", 1.0, 2.0).unwrap_err();
        assert!(matches!(err, ContractError::InvalidArgument(_)));

        let long = "x".repeat(300);
        assert!(matches!(
            c.add(&long, 1.0, 2.0),
            Err(ContractError::InvalidArgument(_))
        ));
        assert!(c.state().is_empty());
    }

    #[test]
    fn configured_id_limit() {
        let config = ContractConfig {
            max_id_len: 4,
            ..Default::default()
        };
        let c = CalculatorContract::with_config(InMemoryWorldState::new(), config);
        assert!(c.add("abcd", 1.0, 1.0).is_ok());
        assert!(c.add("abcde", 1.0, 1.0).is_err());
    }

    #[test]
    fn add_rejects_non_finite_operands() {
        let c = contract();
        for (a, b) in [(f64::NAN, 1.0), (1.0, f64::INFINITY), (f64::NEG_INFINITY, 0.0)] {
            let err = c.add("calc-nf", a, b).unwrap_err();
            assert!(matches!(err, ContractError::InvalidArgument(_)), "{a} + {b}");
        }
        assert!(c.state().is_empty());
    }

    #[test]
    fn deferred_non_finite_fails_at_encoding() {
        let config = ContractConfig {
            non_finite: NonFinitePolicy::Defer,
            ..Default::default()
        };
        let c = CalculatorContract::with_config(InMemoryWorldState::new(), config);
        let err = c.add("calc-nf", f64::NAN, 1.0).unwrap_err();
        assert!(matches!(err, ContractError::Serialization(_)));
        assert!(c.state().is_empty());
    }

    #[test]
    fn overflowing_sum_is_a_serialization_error() {
        let c = contract();
        let err = c.add("calc-big", f64::MAX, f64::MAX).unwrap_err();
        assert!(matches!(err, ContractError::Serialization(_)));
        assert_eq!(err.kind(), "serialization");
        assert!(c.state().is_empty());
    }

    #[test]
    fn add_surfaces_write_failure() {
        let c = contract();
        c.state().set_fail_writes(true);
        let err = c.add("calc-1", 1.0, 2.0).unwrap_err();
        assert!(matches!(err, ContractError::Storage { op: "write", .. }));
        assert!(err.to_string().contains("injected write failure"));
    }

    // -----------------------------------------------------------------------
    // GetCalculationResult
    // -----------------------------------------------------------------------

    #[test]
    fn get_missing_is_not_found() {
        let c = contract();
        let err = c.get_calculation_result("missing-id").unwrap_err();
        assert!(matches!(err, ContractError::NotFound { ref id } if id == "missing-id"));
    }

    #[test]
    fn get_corrupt_bytes_is_deserialization_error() {
        let c = contract();
        c.state()
            .put_state_without_kyc("calc-bad", b"{\"operand1\":")
            .unwrap();
        let err = c.get_calculation_result("calc-bad").unwrap_err();
        assert!(matches!(err, ContractError::Deserialization { .. }));
    }

    #[test]
    fn get_non_conforming_record_is_deserialization_error() {
        let c = contract();
        c.state()
            .put_state_without_kyc("calc-bad", br#"{"value":5}"#)
            .unwrap();
        assert!(matches!(
            c.get_calculation_result("calc-bad"),
            Err(ContractError::Deserialization { .. })
        ));
    }

    #[test]
    fn get_trusts_stored_result() {
        let c = contract();
        c.state()
            .put_state_without_kyc("calc-odd", br#"{"operand1":1,"operand2":1,"result":3}"#)
            .unwrap();
        let r = c.get_calculation_result("calc-odd").unwrap();
        assert_eq!(r.result, 3.0);
    }

    #[test]
    fn get_surfaces_read_failure() {
        let c = contract();
        c.add("calc-1", 1.0, 2.0).unwrap();
        c.state().set_fail_reads(true);
        let err = c.get_calculation_result("calc-1").unwrap_err();
        assert!(matches!(err, ContractError::Storage { op: "read", .. }));
    }

    #[test]
    fn shared_state_handle() {
        let state = Arc::new(InMemoryWorldState::new());
        let writer = CalculatorContract::new(Arc::clone(&state));
        let reader = CalculatorContract::new(&*state);

        writer.add("calc-shared", 0.1, 0.2).unwrap();
        let r = reader.get_calculation_result("calc-shared").unwrap();
        assert_eq!(r.result, 0.1 + 0.2);
    }

    proptest! {
        #[test]
        fn add_then_get_returns_inputs(a in -1e300f64..1e300f64, b in -1e300f64..1e300f64) {
            let c = contract();
            c.add("calc-prop", a, b).unwrap();
            let r = c.get_calculation_result("calc-prop").unwrap();
            prop_assert_eq!(r.operand1, a);
            prop_assert_eq!(r.operand2, b);
            prop_assert_eq!(r.result, a + b);
        }
    }
}
