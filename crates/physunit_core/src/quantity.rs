use crate::error::{in_range, AlgebraError};
use crate::unit::Unit;
use crate::value::Value;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

/// A numeric value tagged with a [`Unit`].
///
/// Arithmetic returns a [`Value`]: whenever the resulting unit cancels to
/// dimensionless the result collapses to `Value::Number`. A dimensionless
/// quantity can still be built directly with [`Quantity::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    value: f64,
    unit: Unit,
}

/// Right-hand side accepted by the combinator.
#[derive(Clone, Copy)]
enum Rhs<'a> {
    Number(f64),
    Quantity(&'a Quantity),
}

impl Quantity {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub fn dimensionless(value: f64) -> Self {
        Self::new(value, Unit::dimensionless())
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn into_parts(self) -> (f64, Unit) {
        (self.value, self.unit)
    }

    /// Applies `values` to the numeric parts and `units` to the units in lockstep.
    /// A plain number on the right is dimensionless: the unit is carried over
    /// unchanged and only `values` applies.
    fn combine(
        &self,
        rhs: Rhs<'_>,
        values: fn(f64, f64) -> f64,
        units: impl FnOnce(&Unit, &Unit) -> Result<Unit, AlgebraError>,
    ) -> Result<Value, AlgebraError> {
        let (value, unit) = match rhs {
            Rhs::Number(n) => (values(self.value, n), self.unit.clone()),
            Rhs::Quantity(other) => (
                values(self.value, other.value),
                units(&self.unit, &other.unit)?,
            ),
        };
        Ok(Value::collapse(value, unit))
    }

    fn product(&self, rhs: Rhs<'_>) -> Result<Value, AlgebraError> {
        self.combine(rhs, |a, b| a * b, Unit::checked_mul)
    }

    fn quotient(&self, rhs: Rhs<'_>) -> Result<Value, AlgebraError> {
        self.combine(rhs, |a, b| a / b, Unit::checked_div)
    }

    fn sum(&self, rhs: Rhs<'_>) -> Result<Value, AlgebraError> {
        self.combine(rhs, |a, b| a + b, Unit::try_add)
    }

    fn difference(&self, rhs: Rhs<'_>) -> Result<Value, AlgebraError> {
        self.combine(rhs, |a, b| a - b, Unit::try_sub)
    }

    /// Product with another quantity; fails only on exponent overflow.
    pub fn checked_mul(&self, rhs: &Quantity) -> Result<Value, AlgebraError> {
        self.product(Rhs::Quantity(rhs))
    }

    pub fn checked_div(&self, rhs: &Quantity) -> Result<Value, AlgebraError> {
        self.quotient(Rhs::Quantity(rhs))
    }

    /// `lhs - self` for a plain number on the left; the number is dimensionless.
    pub(crate) fn subtracted_from(&self, lhs: f64) -> Result<Value, AlgebraError> {
        self.combine(Rhs::Number(lhs), |a, b| b - a, |a, _| Ok(a.clone()))
    }

    /// `lhs / self`, defined as the reciprocal of `self / lhs`.
    pub(crate) fn divided_into(&self, lhs: f64) -> Result<Value, AlgebraError> {
        self.quotient(Rhs::Number(lhs))?.checked_powi(-1)
    }

    /// Integer power of both value and unit; collapses when `n == 0`.
    ///
    /// # Panics
    ///
    /// On exponent overflow; see [`Quantity::checked_powi`].
    pub fn powi(&self, n: i32) -> Value {
        in_range(self.checked_powi(n))
    }

    pub fn checked_powi(&self, n: i32) -> Result<Value, AlgebraError> {
        let unit = self.unit.checked_powi(n)?;
        Ok(Value::collapse(self.value.powi(n), unit))
    }

    /// Real power. Only integral exponents are accepted unless the unit is
    /// already dimensionless.
    pub fn powf(&self, exponent: f64) -> Result<Value, AlgebraError> {
        if self.unit.is_dimensionless() {
            return Ok(Value::Number(self.value.powf(exponent)));
        }
        self.checked_powi(integer_exponent(&self.unit, exponent)?)
    }
}

/// The `i32` power `unit` may be raised to for a real `exponent`.
pub(crate) fn integer_exponent(unit: &Unit, exponent: f64) -> Result<i32, AlgebraError> {
    // NaN and infinities have a NaN fractional part
    if exponent.fract() != 0.0 {
        return Err(AlgebraError::invalid(format!(
            "cannot raise {unit} to the non-integer power {exponent}"
        )));
    }
    exponent.to_i32().ok_or_else(|| {
        AlgebraError::invalid(format!("exponent {exponent} is out of range for {unit}"))
    })
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

// --- Quantity x Quantity ---
// `*` and `/` panic on exponent overflow; `checked_mul`/`checked_div` report it.

impl Mul<&Quantity> for &Quantity {
    type Output = Value;
    fn mul(self, rhs: &Quantity) -> Value {
        in_range(self.product(Rhs::Quantity(rhs)))
    }
}

impl Mul for Quantity {
    type Output = Value;
    fn mul(self, rhs: Quantity) -> Value {
        &self * &rhs
    }
}

impl Div<&Quantity> for &Quantity {
    type Output = Value;
    fn div(self, rhs: &Quantity) -> Value {
        in_range(self.quotient(Rhs::Quantity(rhs)))
    }
}

impl Div for Quantity {
    type Output = Value;
    fn div(self, rhs: Quantity) -> Value {
        &self / &rhs
    }
}

impl Add<&Quantity> for &Quantity {
    type Output = Result<Value, AlgebraError>;
    fn add(self, rhs: &Quantity) -> Self::Output {
        self.sum(Rhs::Quantity(rhs))
    }
}

impl Add for Quantity {
    type Output = Result<Value, AlgebraError>;
    fn add(self, rhs: Quantity) -> Self::Output {
        &self + &rhs
    }
}

impl Sub<&Quantity> for &Quantity {
    type Output = Result<Value, AlgebraError>;
    fn sub(self, rhs: &Quantity) -> Self::Output {
        self.difference(Rhs::Quantity(rhs))
    }
}

impl Sub for Quantity {
    type Output = Result<Value, AlgebraError>;
    fn sub(self, rhs: Quantity) -> Self::Output {
        &self - &rhs
    }
}

// --- Quantity x number ---

impl Mul<f64> for &Quantity {
    type Output = Value;
    fn mul(self, rhs: f64) -> Value {
        in_range(self.product(Rhs::Number(rhs)))
    }
}

impl Mul<f64> for Quantity {
    type Output = Value;
    fn mul(self, rhs: f64) -> Value {
        &self * rhs
    }
}

impl Mul<&Quantity> for f64 {
    type Output = Value;
    fn mul(self, rhs: &Quantity) -> Value {
        rhs * self
    }
}

impl Mul<Quantity> for f64 {
    type Output = Value;
    fn mul(self, rhs: Quantity) -> Value {
        &rhs * self
    }
}

impl Div<f64> for &Quantity {
    type Output = Value;
    fn div(self, rhs: f64) -> Value {
        in_range(self.quotient(Rhs::Number(rhs)))
    }
}

impl Div<f64> for Quantity {
    type Output = Value;
    fn div(self, rhs: f64) -> Value {
        &self / rhs
    }
}

impl Div<&Quantity> for f64 {
    type Output = Value;
    fn div(self, rhs: &Quantity) -> Value {
        in_range(rhs.divided_into(self))
    }
}

impl Div<Quantity> for f64 {
    type Output = Value;
    fn div(self, rhs: Quantity) -> Value {
        in_range(rhs.divided_into(self))
    }
}

impl Add<f64> for &Quantity {
    type Output = Result<Value, AlgebraError>;
    fn add(self, rhs: f64) -> Self::Output {
        self.sum(Rhs::Number(rhs))
    }
}

impl Add<f64> for Quantity {
    type Output = Result<Value, AlgebraError>;
    fn add(self, rhs: f64) -> Self::Output {
        &self + rhs
    }
}

impl Sub<f64> for &Quantity {
    type Output = Result<Value, AlgebraError>;
    fn sub(self, rhs: f64) -> Self::Output {
        self.difference(Rhs::Number(rhs))
    }
}

impl Sub<f64> for Quantity {
    type Output = Result<Value, AlgebraError>;
    fn sub(self, rhs: f64) -> Self::Output {
        &self - rhs
    }
}
