//! JavaScript bindings for `physunit_core`.
//!
//! Operands cross the boundary as plain JS values: a number, a unit given as an
//! exponent object (`{kg: 1, m: -3}`), or a quantity (`{value, unit}`).

mod algebra;
mod catalogue;
mod display;
mod operand;

pub use algebra::evaluate;
pub use catalogue::{constant, constant_names};
pub use display::{express_in, render_value};
