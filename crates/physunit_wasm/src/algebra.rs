//! Binary operators over dynamically typed operands.

use crate::operand::{decode, encode, to_js_error};
use anyhow::{Context, Result};
use physunit_core::{AlgebraError, BinaryOp, Value};
use wasm_bindgen::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Op {
    Binary(BinaryOp),
    Pow,
}

pub(crate) fn parse_op(name: &str) -> Result<Op> {
    let op = match name {
        "add" => Op::Binary(BinaryOp::Add),
        "sub" => Op::Binary(BinaryOp::Sub),
        "mul" => Op::Binary(BinaryOp::Mul),
        "div" => Op::Binary(BinaryOp::Div),
        "pow" => Op::Pow,
        _ => {
            return Err(AlgebraError::InvalidOperand {
                reason: format!("unknown operator '{name}'"),
            }
            .into())
        }
    };
    Ok(op)
}

pub(crate) fn evaluate_values(op: Op, lhs: &Value, rhs: &Value) -> Result<Value> {
    let result = match op {
        Op::Binary(op) => Value::apply(op, lhs, rhs),
        Op::Pow => lhs.pow(rhs),
    };
    result.with_context(|| format!("{op:?} failed"))
}

/// Evaluates `lhs <op> rhs` for `op` in `add`, `sub`, `mul`, `div`, `pow`.
#[wasm_bindgen]
pub fn evaluate(op: &str, lhs: JsValue, rhs: JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let op = parse_op(op).map_err(to_js_error)?;
    let lhs = decode(lhs).context("left operand").map_err(to_js_error)?;
    let rhs = decode(rhs).context("right operand").map_err(to_js_error)?;
    let result = evaluate_values(op, &lhs, &rhs).map_err(to_js_error)?;
    encode(&result).map_err(to_js_error)
}
