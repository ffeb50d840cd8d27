use crate::error::{in_range, AlgebraError};
use crate::quantity::Quantity;
use num_traits::{Inv, One, Pow};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

/// A physical unit as a map from dimension symbol to a non-zero integer exponent.
///
/// The map is kept sorted by symbol and never stores a zero exponent, so two
/// units are equal exactly when they describe the same dimension vector.
/// There are no mutators; every operation builds a new `Unit`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, i32>", into = "BTreeMap<String, i32>")]
pub struct Unit {
    parts: BTreeMap<String, i32>,
}

impl Unit {
    /// Builds a unit from `(symbol, exponent)` pairs.
    /// Repeated symbols are summed, then zero exponents are dropped.
    ///
    /// # Panics
    ///
    /// If a repeated symbol's exponents sum past the `i32` range; see [`Unit::try_new`].
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = (S, i32)>,
        S: Into<String>,
    {
        in_range(Self::try_new(parts))
    }

    pub fn try_new<I, S>(parts: I) -> Result<Self, AlgebraError>
    where
        I: IntoIterator<Item = (S, i32)>,
        S: Into<String>,
    {
        let mut summed: BTreeMap<String, i32> = BTreeMap::new();
        for (symbol, power) in parts {
            let symbol: String = symbol.into();
            let current = summed.get(&symbol).copied().unwrap_or(0);
            let total = current
                .checked_add(power)
                .ok_or_else(|| AlgebraError::exponent_overflow(&symbol))?;
            summed.insert(symbol, total);
        }
        Ok(Self::canonical(summed))
    }

    fn canonical(mut parts: BTreeMap<String, i32>) -> Self {
        parts.retain(|_, power| *power != 0);
        Unit { parts }
    }

    /// A single dimension with exponent 1.
    pub fn base(symbol: impl Into<String>) -> Self {
        Self::new([(symbol, 1)])
    }

    /// The empty unit.
    pub fn dimensionless() -> Self {
        Self::default()
    }

    /// Exponent of `symbol`, 0 when the dimension is absent.
    pub fn exponent(&self, symbol: &str) -> i32 {
        self.parts.get(symbol).copied().unwrap_or(0)
    }

    /// `(symbol, exponent)` pairs in canonical (ascending symbol) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> + '_ {
        self.parts.iter().map(|(symbol, &power)| (symbol.as_str(), power))
    }

    /// Sum of the absolute exponents.
    pub fn degree(&self) -> u64 {
        self.parts
            .values()
            .map(|power| u64::from(power.unsigned_abs()))
            .sum()
    }

    pub fn is_dimensionless(&self) -> bool {
        self.parts.is_empty()
    }

    /// Integer power. `u^0` is dimensionless and `u^-n` is the reciprocal of `u^n`.
    ///
    /// # Panics
    ///
    /// If a scaled exponent leaves the `i32` range; see [`Unit::checked_powi`].
    pub fn powi(&self, n: i32) -> Self {
        in_range(self.checked_powi(n))
    }

    pub fn checked_powi(&self, n: i32) -> Result<Self, AlgebraError> {
        let mut parts = BTreeMap::new();
        for (symbol, power) in self.iter() {
            let scaled = power
                .checked_mul(n)
                .ok_or_else(|| AlgebraError::exponent_overflow(symbol))?;
            parts.insert(symbol.to_string(), scaled);
        }
        Ok(Self::canonical(parts))
    }

    pub fn recip(&self) -> Self {
        self.powi(-1)
    }

    /// Exponent-wise sum, or `InvalidOperand` when an exponent overflows.
    pub fn checked_mul(&self, rhs: &Unit) -> Result<Unit, AlgebraError> {
        self.combine(rhs, 1)
    }

    /// Exponent-wise difference, see [`Unit::checked_mul`].
    pub fn checked_div(&self, rhs: &Unit) -> Result<Unit, AlgebraError> {
        self.combine(rhs, -1)
    }

    /// Compatibility-gated addition: succeeds only when both units are equal.
    pub fn try_add(&self, rhs: &Unit) -> Result<Unit, AlgebraError> {
        self.same_as(rhs, "add")
    }

    /// Compatibility-gated subtraction, see [`Unit::try_add`].
    pub fn try_sub(&self, rhs: &Unit) -> Result<Unit, AlgebraError> {
        self.same_as(rhs, "subtract")
    }

    fn same_as(&self, rhs: &Unit, op: &'static str) -> Result<Unit, AlgebraError> {
        if self == rhs {
            Ok(self.clone())
        } else {
            tracing::debug!(lhs = %self, rhs = %rhs, op, "rejected mismatched units");
            Err(AlgebraError::incompatible(op, self, rhs))
        }
    }

    // sign = 1 sums exponents, sign = -1 subtracts them
    fn combine(&self, rhs: &Unit, sign: i32) -> Result<Unit, AlgebraError> {
        let mut parts = self.parts.clone();
        for (symbol, &power) in &rhs.parts {
            let current = parts.get(symbol).copied().unwrap_or(0);
            let total = power
                .checked_mul(sign)
                .and_then(|power| current.checked_add(power))
                .ok_or_else(|| AlgebraError::exponent_overflow(symbol))?;
            parts.insert(symbol.clone(), total);
        }
        Ok(Self::canonical(parts))
    }
}

impl From<BTreeMap<String, i32>> for Unit {
    fn from(parts: BTreeMap<String, i32>) -> Self {
        Self::canonical(parts)
    }
}

impl From<Unit> for BTreeMap<String, i32> {
    fn from(unit: Unit) -> Self {
        unit.parts
    }
}

/// Canonical text form, e.g. `[kg m^-3]`.
impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, (symbol, power)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            if power == 1 {
                f.write_str(symbol)?;
            } else {
                write!(f, "{symbol}^{power}")?;
            }
        }
        f.write_str("]")
    }
}

// --- Unit x Unit ---
// These panic on exponent overflow; `checked_mul`/`checked_div` report it instead.

impl Mul<&Unit> for &Unit {
    type Output = Unit;
    fn mul(self, rhs: &Unit) -> Unit {
        in_range(self.checked_mul(rhs))
    }
}

impl Mul for Unit {
    type Output = Unit;
    fn mul(self, rhs: Unit) -> Unit {
        &self * &rhs
    }
}

impl Div<&Unit> for &Unit {
    type Output = Unit;
    fn div(self, rhs: &Unit) -> Unit {
        in_range(self.checked_div(rhs))
    }
}

impl Div for Unit {
    type Output = Unit;
    fn div(self, rhs: Unit) -> Unit {
        &self / &rhs
    }
}

impl Add for Unit {
    type Output = Result<Unit, AlgebraError>;
    fn add(self, rhs: Unit) -> Self::Output {
        self.try_add(&rhs)
    }
}

impl Sub for Unit {
    type Output = Result<Unit, AlgebraError>;
    fn sub(self, rhs: Unit) -> Self::Output {
        self.try_sub(&rhs)
    }
}

impl One for Unit {
    fn one() -> Self {
        Self::dimensionless()
    }
}

impl Pow<i32> for Unit {
    type Output = Unit;
    fn pow(self, rhs: i32) -> Unit {
        self.powi(rhs)
    }
}

impl Pow<i32> for &Unit {
    type Output = Unit;
    fn pow(self, rhs: i32) -> Unit {
        self.powi(rhs)
    }
}

impl Inv for Unit {
    type Output = Unit;
    fn inv(self) -> Unit {
        self.recip()
    }
}

// --- Unit x number ---
// Scaling a unit by a number constructs a quantity in either operand order.
// This deliberately departs from the earlier reflected multiply, where
// `number * unit` returned the bare unit and silently discarded the number.

impl Mul<f64> for Unit {
    type Output = Quantity;
    fn mul(self, rhs: f64) -> Quantity {
        Quantity::new(rhs, self)
    }
}

impl Mul<Unit> for f64 {
    type Output = Quantity;
    fn mul(self, rhs: Unit) -> Quantity {
        Quantity::new(self, rhs)
    }
}

impl Div<f64> for Unit {
    type Output = Quantity;
    fn div(self, rhs: f64) -> Quantity {
        Quantity::new(rhs.recip(), self)
    }
}

impl Div<Unit> for f64 {
    type Output = Quantity;
    fn div(self, rhs: Unit) -> Quantity {
        Quantity::new(self, rhs.recip())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kg() -> Unit {
        Unit::base("kg")
    }

    fn m() -> Unit {
        Unit::base("m")
    }

    fn s() -> Unit {
        Unit::base("s")
    }

    #[test]
    fn canonical_form_sorts_symbols_and_marks_exponents() {
        let density = Unit::new([("m", -3), ("kg", 1)]);
        assert_eq!(density.to_string(), "[kg m^-3]");
        assert_eq!(Unit::dimensionless().to_string(), "[]");
        assert_eq!(Unit::new([("A", 2), ("cd", 1)]).to_string(), "[A^2 cd]");
    }

    #[test]
    fn equal_units_render_identically() {
        let volume = Unit::new([("m", 3)]);
        let energy = Unit::new([("m", 2), ("s", -2), ("kg", 1)]);
        let built = &(&(&kg() * &volume) / &m()) / &Unit::new([("s", 2)]);
        assert_eq!(built, energy);
        assert_eq!(built.to_string(), energy.to_string());
    }

    #[test]
    fn zero_exponents_never_persist() {
        assert_eq!(kg(), Unit::new([("kg", 1), ("m", 0)]));
        assert_eq!(Unit::new([("m", 2), ("m", -2)]), Unit::dimensionless());
        assert_eq!((&m() / &m()).degree(), 0);
    }

    #[test]
    fn equality_has_no_dimension_aliasing() {
        assert_eq!(kg(), Unit::base("kg"));
        assert_ne!(kg(), Unit::base("g"));
    }

    #[test]
    fn division_undoes_multiplication() {
        let u = Unit::new([("kg", 1), ("m", -3)]);
        let v = Unit::new([("s", 2), ("m", 1), ("A", -1)]);
        assert_eq!(&(&u * &v) / &v, u);
    }

    #[test]
    fn operands_are_left_untouched() {
        let u = kg();
        let v = m();
        let _ = &u * &v;
        let _ = &u / &v;
        assert_eq!(u.to_string(), "[kg]");
        assert_eq!(v.to_string(), "[m]");
    }

    #[test]
    fn integer_power_matches_repeated_products() {
        assert_eq!(m().powi(0), Unit::one());
        assert_eq!(m().powi(3), &(&m() * &m()) * &m());
        assert_eq!(s().powi(-2), &(&Unit::one() / &s()) / &s());
        assert_eq!(Unit::new([("m", 1), ("s", -1)]).pow(2).to_string(), "[m^2 s^-2]");
        assert_eq!(s().inv(), Unit::new([("s", -1)]));
    }

    #[test]
    fn degree_sums_absolute_exponents() {
        assert_eq!(Unit::new([("kg", 1), ("m", -3)]).degree(), 4);
        assert_eq!(Unit::dimensionless().degree(), 0);
        assert!(Unit::dimensionless().is_dimensionless());
    }

    #[test]
    fn exponent_overflow_is_reported_instead_of_wrapping() {
        let huge = Unit::new([("m", i32::MAX)]);
        let err = huge.checked_mul(&huge).expect_err("exponent sum overflows");
        assert_eq!(
            err,
            AlgebraError::InvalidOperand {
                reason: "exponent of m is out of range".to_string()
            }
        );
        assert!(huge.checked_div(&Unit::new([("m", -1)])).is_err());
        assert_eq!(huge.checked_div(&huge), Ok(Unit::dimensionless()));
        assert!(m().powi(2).checked_powi(1 << 30).is_err());
        assert!(Unit::new([("s", i32::MIN)]).checked_powi(-1).is_err());
        assert!(Unit::try_new([("s", i32::MAX), ("s", 1)]).is_err());
    }

    #[test]
    #[should_panic(expected = "exponent of m is out of range")]
    fn overflowing_product_operator_panics_rather_than_wrapping() {
        let huge = Unit::new([("m", i32::MAX)]);
        let _ = &huge * &huge;
    }

    #[test]
    fn degree_does_not_wrap_for_extreme_exponents() {
        let wide = Unit::new([("m", i32::MIN), ("s", i32::MIN)]);
        assert_eq!(wide.degree(), 1u64 << 32);
        assert!(!wide.is_dimensionless());
    }

    #[test]
    fn addition_is_gated_on_equal_units() {
        let rho = &kg() / &Unit::new([("m", 3)]);
        let err = rho.try_add(&kg()).expect_err("mismatched units must not add");
        assert!(matches!(err, AlgebraError::IncompatibleUnits { op: "add", .. }));
        assert_eq!(
            err.to_string(),
            "cannot add [kg m^-3] and [kg]: units are not the same"
        );

        let sum = (rho.clone() + Unit::new([("kg", 1), ("m", -3)])).expect("equal units add");
        assert_eq!(sum, rho);
        assert!((m() - s()).is_err());
        assert_eq!((m() - m()).expect("equal units subtract"), m());
    }

    #[test]
    fn scaling_by_a_number_builds_a_quantity_in_either_order() {
        let left = m() * 5.0;
        let right = 5.0 * m();
        assert_eq!(left, right);
        assert_eq!(left.value(), 5.0);
        assert_eq!(left.unit(), &m());

        let per = 4.0 / s();
        assert_eq!(per.unit().to_string(), "[s^-1]");
        assert_eq!((s() / 4.0).value(), 0.25);
    }

    #[test]
    fn deserialization_canonicalizes() {
        let unit: Unit = serde_json::from_str(r#"{"m": 0, "kg": 1}"#).expect("valid unit json");
        assert_eq!(unit, kg());
        assert_eq!(serde_json::to_string(&unit).expect("serializes"), r#"{"kg":1}"#);
    }
}
