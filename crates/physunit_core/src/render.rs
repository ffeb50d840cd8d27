//! Text and LaTeX rendering of algebra values for notebook-style display.
//!
//! Only public accessors of [`Value`], [`Quantity`] and [`Unit`] are used here;
//! nothing in the algebra depends on this module.

use crate::error::AlgebraError;
use crate::quantity::Quantity;
use crate::unit::Unit;
use crate::value::Value;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderStyle {
    /// Numbers in `g`-style notation followed by the canonical unit text.
    Plain,
    /// Inline LaTeX math.
    #[default]
    Latex,
}

/// Most significant digits an `f64` carries; larger precisions are clamped to it.
pub const MAX_PRECISION: usize = 17;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Significant digits, clamped to `1..=MAX_PRECISION` when formatting.
    pub precision: usize,
    pub style: RenderStyle,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            precision: 3,
            style: RenderStyle::Latex,
        }
    }
}

/// Mantissa (trailing zeros trimmed) and, when scientific notation applies, the decimal exponent.
fn significant_parts(value: f64, precision: usize) -> (String, Option<i32>) {
    if value == 0.0 || !value.is_finite() {
        return (format!("{value}"), None);
    }
    let precision = precision.clamp(1, MAX_PRECISION);
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };
    // clamped above, so the cast is lossless
    let digits = precision as i32;
    if exponent < -4 || exponent >= digits {
        (trim_fraction(mantissa), Some(exponent))
    } else {
        let decimals = (digits - 1 - exponent).max(0) as usize;
        (trim_fraction(&format!("{value:.decimals$}")), None)
    }
}

fn trim_fraction(text: &str) -> String {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text.to_string()
    }
}

/// Formats `value` with `precision` significant digits, switching to
/// scientific notation outside `1e-4 <= |value| < 10^precision`.
pub fn format_number(value: f64, precision: usize) -> String {
    match significant_parts(value, precision) {
        (mantissa, Some(exponent)) => format!("{mantissa}e{exponent}"),
        (mantissa, None) => mantissa,
    }
}

fn latex_number(value: f64, precision: usize) -> String {
    match significant_parts(value, precision) {
        (mantissa, Some(exponent)) => format!("{mantissa} \\times 10^{{{exponent}}}"),
        (mantissa, None) => mantissa,
    }
}

/// LaTeX form of a unit, e.g. `\mathrm{kg} \cdot \mathrm{m}^{-3}`.
pub fn unit_latex(unit: &Unit) -> String {
    unit.iter()
        .map(|(symbol, power)| {
            if power == 1 {
                format!("\\mathrm{{{symbol}}}")
            } else {
                format!("\\mathrm{{{symbol}}}^{{{power}}}")
            }
        })
        .collect::<Vec<_>>()
        .join(" \\cdot ")
}

pub fn render(value: &Value, settings: &RenderSettings) -> String {
    let precision = settings.precision;
    match settings.style {
        RenderStyle::Plain => match value {
            Value::Number(n) => format_number(*n, precision),
            Value::Unit(u) => u.to_string(),
            Value::Quantity(q) => format!("{} {}", format_number(q.value(), precision), q.unit()),
        },
        RenderStyle::Latex => {
            let body = match value {
                Value::Number(n) => latex_number(*n, precision),
                Value::Unit(u) => unit_latex(u),
                Value::Quantity(q) if q.unit().is_dimensionless() => {
                    latex_number(q.value(), precision)
                }
                Value::Quantity(q) => format!(
                    "{} \\; {}",
                    latex_number(q.value(), precision),
                    unit_latex(q.unit())
                ),
            };
            format!("${body}$")
        }
    }
}

/// Numeric value of `quantity` measured in multiples of `reference`,
/// e.g. an energy in electronvolts given `reference = 1 eV` in joules.
/// The two must cancel to a dimensionless ratio.
pub fn express_in(quantity: &Quantity, reference: &Quantity) -> Result<f64, AlgebraError> {
    match quantity.checked_div(reference)? {
        Value::Number(ratio) => Ok(ratio),
        _ => Err(AlgebraError::incompatible(
            "compare",
            quantity.unit(),
            reference.unit(),
        )),
    }
}
