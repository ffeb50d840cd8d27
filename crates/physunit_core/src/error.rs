use thiserror::Error;

/// Failures raised at the boundary of a Unit or Quantity operator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlgebraError {
    /// Addition or subtraction between units whose exponent maps differ, or
    /// (`op == "compare"`) a rescale between quantities of different dimension.
    #[error("cannot {op} {lhs} and {rhs}: units are not the same")]
    IncompatibleUnits {
        op: &'static str,
        lhs: String,
        rhs: String,
    },
    /// An operand the operator has no meaning for, including one whose
    /// resulting exponent would not fit in an `i32`.
    #[error("invalid operand: {reason}")]
    InvalidOperand { reason: String },
}

impl AlgebraError {
    pub(crate) fn incompatible(op: &'static str, lhs: impl ToString, rhs: impl ToString) -> Self {
        Self::IncompatibleUnits {
            op,
            lhs: lhs.to_string(),
            rhs: rhs.to_string(),
        }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidOperand {
            reason: reason.into(),
        }
    }

    pub(crate) fn exponent_overflow(symbol: &str) -> Self {
        Self::invalid(format!("exponent of {symbol} is out of range"))
    }
}

/// Operator impls cannot return a `Result`; exponent overflow panics there,
/// as integer overflow does, instead of wrapping to a wrong unit.
pub(crate) fn in_range<T>(result: Result<T, AlgebraError>) -> T {
    result.unwrap_or_else(|err| panic!("{err}"))
}
