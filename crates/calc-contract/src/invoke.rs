//! String-argument dispatch, the way ledger hosts call into chaincode.

use calc_state::WorldState;
use serde::{Deserialize, Serialize};

use crate::contract::CalculatorContract;
use crate::error::{ContractError, ContractResult};

pub const FN_ADD: &str = "Add";
pub const FN_GET_CALCULATION_RESULT: &str = "GetCalculationResult";

/// A transaction request as delivered by the host: a function name plus its
/// positional arguments, all strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    pub function: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, A>(function: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            function: function.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: WorldState> CalculatorContract<S> {
    /// Dispatch `function` with string `args`.
    ///
    /// `Add` returns an empty payload. `GetCalculationResult` returns the
    /// record's canonical JSON.
    pub fn invoke(&self, function: &str, args: &[String]) -> ContractResult<Vec<u8>> {
        match function {
            FN_ADD => {
                let [id, a, b] = expect_args::<3>(function, args)?;
                let operand1 = parse_operand("operand1", a)?;
                let operand2 = parse_operand("operand2", b)?;
                self.add(id, operand1, operand2)?;
                Ok(Vec::new())
            }
            FN_GET_CALCULATION_RESULT => {
                let [id] = expect_args::<1>(function, args)?;
                let record = self.get_calculation_result(id)?;
                record.to_json_bytes().map_err(ContractError::Serialization)
            }
            other => Err(ContractError::UnknownFunction(other.to_string())),
        }
    }

    /// Dispatch a decoded [`Invocation`].
    pub fn invoke_request(&self, invocation: &Invocation) -> ContractResult<Vec<u8>> {
        self.invoke(&invocation.function, &invocation.args)
    }
}

fn expect_args<'a, const N: usize>(
    function: &str,
    args: &'a [String],
) -> ContractResult<[&'a str; N]> {
    if args.len() != N {
        return Err(ContractError::InvalidArgument(format!(
            "{function} expects {N} argument(s), got {}",
            args.len()
        )));
    }
    Ok(std::array::from_fn(|i| args[i].as_str()))
}

fn parse_operand(name: &str, raw: &str) -> ContractResult<f64> {
    raw.trim().parse::<f64>().map_err(|e| {
        ContractError::InvalidArgument(format!("{name} {raw:?} is not a number: {e}"))
    })
}
