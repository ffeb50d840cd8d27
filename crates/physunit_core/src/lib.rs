//! The `physunit_core` crate is a small symbolic algebra for dimensional analysis.
//! Units are dimension-exponent vectors and quantities are numbers tagged with a unit;
//! the operators keep both in lockstep and reject dimensionally inconsistent sums.
//!
//! Key components:
//! - **Unit**: the multiplicative group of exponent maps, with equality-gated addition.
//! - **Quantity**: value/unit pairs whose results collapse to plain numbers once dimensionless.
//! - **Value**: the closed sum of number, unit and quantity that every operator dispatches over.
//! - **Constants**: SI units and physical constants built once from the algebra.
//! - **Render**: text and LaTeX output for notebook-style display.

pub mod constants;
pub mod error;
pub mod quantity;
pub mod render;
pub mod unit;
pub mod value;

pub use error::AlgebraError;
pub use quantity::Quantity;
pub use unit::Unit;
pub use value::{BinaryOp, Value};
