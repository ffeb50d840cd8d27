//! Conversion between JS values and algebra values.

use anyhow::{anyhow, Result};
use physunit_core::{AlgebraError, Value};
use serde::Serialize;
use serde_wasm_bindgen::{from_value, Serializer};
use wasm_bindgen::JsValue;

/// Decodes a JS operand; anything but a number, unit or quantity is an invalid operand.
pub(crate) fn decode(value: JsValue) -> Result<Value> {
    if let Some(n) = value.as_f64() {
        return Ok(Value::Number(n));
    }
    from_value::<Value>(value).map_err(|_| {
        AlgebraError::InvalidOperand {
            reason: "expected a number, a unit or a quantity".to_string(),
        }
        .into()
    })
}

/// Units are emitted as plain objects rather than JS `Map`s.
pub(crate) fn encode(value: &Value) -> Result<JsValue> {
    value
        .serialize(&Serializer::json_compatible())
        .map_err(|e| anyhow!("Serialization error: {}", e))
}

pub(crate) fn to_js_error(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{err:#}"))
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use physunit_core::{Quantity, Unit};
    use std::collections::BTreeMap;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[derive(Serialize)]
    struct RawQuantity {
        value: f64,
        unit: BTreeMap<&'static str, i32>,
    }

    fn to_js(value: &impl Serialize) -> JsValue {
        value
            .serialize(&Serializer::json_compatible())
            .expect("serializable operand")
    }

    #[wasm_bindgen_test]
    fn decode_reads_a_quantity_object() {
        let raw = RawQuantity {
            value: 3.0,
            unit: BTreeMap::from([("m", 1), ("s", -1), ("kg", 0)]),
        };
        let decoded = decode(to_js(&raw)).expect("quantity object");
        assert_eq!(
            decoded,
            Value::Quantity(Quantity::new(3.0, Unit::new([("m", 1), ("s", -1)])))
        );
    }

    #[wasm_bindgen_test]
    fn decode_reads_a_unit_object() {
        let raw = BTreeMap::from([("A", 2), ("cd", 1)]);
        let decoded = decode(to_js(&raw)).expect("unit object");
        assert_eq!(decoded, Value::Unit(Unit::new([("A", 2), ("cd", 1)])));
    }

    #[wasm_bindgen_test]
    fn decode_rejects_fractional_unit_exponents() {
        let raw = BTreeMap::from([("m", 1.5)]);
        let err = decode(to_js(&raw)).expect_err("exponents are integers");
        assert!(matches!(
            err.downcast_ref::<AlgebraError>(),
            Some(AlgebraError::InvalidOperand { .. })
        ));
        assert!(to_js_error(err)
            .as_string()
            .unwrap_or_default()
            .contains("expected a number, a unit or a quantity"));
    }

    #[wasm_bindgen_test]
    fn decode_rejects_a_quantity_without_a_value() {
        let raw = BTreeMap::from([("unit", BTreeMap::from([("m", 1.5)]))]);
        assert!(decode(to_js(&raw)).is_err());
    }
}
