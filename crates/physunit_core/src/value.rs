use crate::error::{in_range, AlgebraError};
use crate::quantity::{integer_exponent, Quantity};
use crate::unit::Unit;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

/// Any operand or result of the algebra.
///
/// Every operator dispatches exhaustively over the three cases:
/// - numbers combine as ordinary `f64`s;
/// - units form a multiplicative group, and add/subtract only as a
///   compatibility check;
/// - quantities go through the combinator, which treats numbers as
///   dimensionless and promotes a bare unit `u` to the quantity `1 u`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Quantity(Quantity),
    Unit(Unit),
}

/// The four binary operators of the algebra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl Value {
    /// Wraps a combinator result, dropping a unit that cancelled to dimensionless.
    pub(crate) fn collapse(value: f64, unit: Unit) -> Value {
        if unit.is_dimensionless() {
            tracing::trace!(value, "collapsed dimensionless result");
            Value::Number(value)
        } else {
            Value::Quantity(Quantity::new(value, unit))
        }
    }

    pub fn apply(op: BinaryOp, lhs: &Value, rhs: &Value) -> Result<Value, AlgebraError> {
        match op {
            BinaryOp::Add | BinaryOp::Sub => lhs.additive(rhs, op),
            BinaryOp::Mul => lhs.product(rhs),
            BinaryOp::Div => lhs.quotient(rhs),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_unit(&self) -> Option<&Unit> {
        match self {
            Value::Unit(u) => Some(u),
            _ => None,
        }
    }

    pub fn as_quantity(&self) -> Option<&Quantity> {
        match self {
            Value::Quantity(q) => Some(q),
            _ => None,
        }
    }

    /// Numbers become dimensionless quantities and a unit `u` becomes `1 u`.
    pub fn into_quantity(self) -> Quantity {
        match self {
            Value::Number(n) => Quantity::dimensionless(n),
            Value::Unit(u) => Quantity::new(1.0, u),
            Value::Quantity(q) => q,
        }
    }

    /// Integer power. Every case accepts an integral exponent.
    ///
    /// # Panics
    ///
    /// On exponent overflow; see [`Value::checked_powi`].
    pub fn powi(&self, n: i32) -> Value {
        in_range(self.checked_powi(n))
    }

    pub fn checked_powi(&self, n: i32) -> Result<Value, AlgebraError> {
        match self {
            Value::Number(x) => Ok(Value::Number(x.powi(n))),
            Value::Unit(u) => u.checked_powi(n).map(Value::Unit),
            Value::Quantity(q) => q.checked_powi(n),
        }
    }

    /// Raises `self` to `exponent`, which must be a plain number.
    pub fn pow(&self, exponent: &Value) -> Result<Value, AlgebraError> {
        let exponent = match exponent {
            Value::Number(n) => *n,
            Value::Quantity(q) => {
                return Err(AlgebraError::invalid(format!(
                    "the quantity {q} cannot be used as an exponent"
                )))
            }
            Value::Unit(u) => {
                return Err(AlgebraError::invalid(format!(
                    "the unit {u} cannot be used as an exponent"
                )))
            }
        };
        match self {
            Value::Number(x) => Ok(Value::Number(x.powf(exponent))),
            Value::Unit(u) => u.checked_powi(integer_exponent(u, exponent)?).map(Value::Unit),
            Value::Quantity(q) => q.powf(exponent),
        }
    }

    // Number-scaled cases cannot overflow an exponent; the rest go through
    // the checked unit arithmetic.
    fn product(&self, rhs: &Value) -> Result<Value, AlgebraError> {
        match (self, rhs) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a * b)),
            (Value::Unit(a), Value::Unit(b)) => a.checked_mul(b).map(Value::Unit),
            (Value::Unit(u), Value::Number(n)) | (Value::Number(n), Value::Unit(u)) => {
                Ok(Value::Quantity(u.clone() * *n))
            }
            (Value::Quantity(q), Value::Number(n)) | (Value::Number(n), Value::Quantity(q)) => {
                Ok(q * *n)
            }
            (Value::Quantity(a), Value::Quantity(b)) => a.checked_mul(b),
            (Value::Quantity(q), Value::Unit(u)) | (Value::Unit(u), Value::Quantity(q)) => {
                q.checked_mul(&Quantity::new(1.0, u.clone()))
            }
        }
    }

    fn quotient(&self, rhs: &Value) -> Result<Value, AlgebraError> {
        match (self, rhs) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a / b)),
            (Value::Unit(a), Value::Unit(b)) => a.checked_div(b).map(Value::Unit),
            (Value::Unit(u), Value::Number(n)) => Ok(Value::Quantity(u.clone() / *n)),
            (Value::Number(n), Value::Unit(u)) => {
                Ok(Value::Quantity(Quantity::new(*n, u.checked_powi(-1)?)))
            }
            (Value::Quantity(q), Value::Number(n)) => Ok(q / *n),
            (Value::Number(n), Value::Quantity(q)) => q.divided_into(*n),
            (Value::Quantity(a), Value::Quantity(b)) => a.checked_div(b),
            (Value::Quantity(q), Value::Unit(u)) => {
                q.checked_div(&Quantity::new(1.0, u.clone()))
            }
            (Value::Unit(u), Value::Quantity(q)) => {
                Quantity::new(1.0, u.clone()).checked_div(q)
            }
        }
    }

    fn additive(&self, rhs: &Value, op: BinaryOp) -> Result<Value, AlgebraError> {
        let subtract = op == BinaryOp::Sub;
        let name = if subtract { "subtract" } else { "add" };
        match (self, rhs) {
            (Value::Number(a), Value::Number(b)) => {
                Ok(Value::Number(if subtract { a - b } else { a + b }))
            }
            (Value::Unit(a), Value::Unit(b)) => {
                let unit = if subtract { a.try_sub(b) } else { a.try_add(b) };
                unit.map(Value::Unit)
            }
            (Value::Unit(u), Value::Number(n)) => Err(AlgebraError::incompatible(name, u, n)),
            (Value::Number(n), Value::Unit(u)) => Err(AlgebraError::incompatible(name, n, u)),
            (Value::Quantity(q), Value::Number(n)) => {
                if subtract {
                    q - *n
                } else {
                    q + *n
                }
            }
            (Value::Number(n), Value::Quantity(q)) => {
                if subtract {
                    q.subtracted_from(*n)
                } else {
                    q + *n
                }
            }
            (Value::Quantity(a), Value::Quantity(b)) => {
                if subtract {
                    a - b
                } else {
                    a + b
                }
            }
            (Value::Quantity(_), Value::Unit(_)) | (Value::Unit(_), Value::Quantity(_)) => {
                let lhs = self.clone().into_quantity();
                let rhs = rhs.clone().into_quantity();
                if subtract {
                    lhs - rhs
                } else {
                    lhs + rhs
                }
            }
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<Unit> for Value {
    fn from(u: Unit) -> Self {
        Value::Unit(u)
    }
}

impl From<Quantity> for Value {
    fn from(q: Quantity) -> Self {
        Value::Quantity(q)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Unit(u) => write!(f, "{u}"),
            Value::Quantity(q) => write!(f, "{q}"),
        }
    }
}

impl Mul<&Value> for &Value {
    type Output = Value;
    fn mul(self, rhs: &Value) -> Value {
        in_range(self.product(rhs))
    }
}

impl Mul for Value {
    type Output = Value;
    fn mul(self, rhs: Value) -> Value {
        in_range(self.product(&rhs))
    }
}

impl Div<&Value> for &Value {
    type Output = Value;
    fn div(self, rhs: &Value) -> Value {
        in_range(self.quotient(rhs))
    }
}

impl Div for Value {
    type Output = Value;
    fn div(self, rhs: Value) -> Value {
        in_range(self.quotient(&rhs))
    }
}

impl Add<&Value> for &Value {
    type Output = Result<Value, AlgebraError>;
    fn add(self, rhs: &Value) -> Self::Output {
        self.additive(rhs, BinaryOp::Add)
    }
}

impl Add for Value {
    type Output = Result<Value, AlgebraError>;
    fn add(self, rhs: Value) -> Self::Output {
        self.additive(&rhs, BinaryOp::Add)
    }
}

impl Sub<&Value> for &Value {
    type Output = Result<Value, AlgebraError>;
    fn sub(self, rhs: &Value) -> Self::Output {
        self.additive(rhs, BinaryOp::Sub)
    }
}

impl Sub for Value {
    type Output = Result<Value, AlgebraError>;
    fn sub(self, rhs: Value) -> Self::Output {
        self.additive(&rhs, BinaryOp::Sub)
    }
}
