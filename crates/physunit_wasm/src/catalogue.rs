//! Catalogue lookups.

use crate::operand::{encode, to_js_error};
use anyhow::anyhow;
use physunit_core::constants::{lookup, names};
use wasm_bindgen::prelude::*;

/// Returns the unit or constant registered under `name`.
#[wasm_bindgen]
pub fn constant(name: &str) -> Result<JsValue, JsValue> {
    let value = lookup(name)
        .ok_or_else(|| anyhow!("Unknown constant '{}'", name))
        .map_err(to_js_error)?;
    encode(&value).map_err(to_js_error)
}

#[wasm_bindgen]
pub fn constant_names() -> Vec<String> {
    names().iter().map(|name| name.to_string()).collect()
}
