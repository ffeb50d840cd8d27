//! Rendering for the notebook front end.

use crate::operand::{decode, to_js_error};
use anyhow::{anyhow, Context, Result};
use physunit_core::render::{self, RenderSettings};
use serde_wasm_bindgen::from_value;
use wasm_bindgen::prelude::*;

fn settings_from_js(settings: JsValue) -> Result<RenderSettings> {
    if settings.is_undefined() || settings.is_null() {
        return Ok(RenderSettings::default());
    }
    from_value(settings).map_err(|e| anyhow!("Invalid render settings: {}", e))
}

/// Renders an operand as text or LaTeX; `settings` may be omitted.
#[wasm_bindgen]
pub fn render_value(value: JsValue, settings: JsValue) -> Result<String, JsValue> {
    let value = decode(value).map_err(to_js_error)?;
    let settings = settings_from_js(settings).map_err(to_js_error)?;
    Ok(render::render(&value, &settings))
}

/// Expresses `value` as a multiple of `reference`; both must share a dimension.
#[wasm_bindgen]
pub fn express_in(value: JsValue, reference: JsValue) -> Result<f64, JsValue> {
    let value = decode(value)
        .context("value")
        .map_err(to_js_error)?
        .into_quantity();
    let reference = decode(reference)
        .context("reference")
        .map_err(to_js_error)?
        .into_quantity();
    render::express_in(&value, &reference)
        .context("Conversion failed")
        .map_err(to_js_error)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use physunit_core::constants::catalogue;
    use physunit_core::Value;
    use serde::Serialize;
    use serde_wasm_bindgen::Serializer;

    use wasm_bindgen_test::wasm_bindgen_test;

    fn to_js(value: &Value) -> JsValue {
        value
            .serialize(&Serializer::json_compatible())
            .expect("serializable value")
    }

    #[wasm_bindgen_test]
    fn render_value_defaults_to_latex() {
        let text = render_value(JsValue::from_f64(0.5), JsValue::UNDEFINED).expect("renders");
        assert_eq!(text, "$0.5$");
    }

    #[wasm_bindgen_test]
    fn express_in_rejects_mismatched_dimensions() {
        let c = to_js(&Value::Quantity(catalogue().c.clone()));
        let e = to_js(&Value::Quantity(catalogue().e.clone()));
        assert!(express_in(c, e).is_err());
    }
}
