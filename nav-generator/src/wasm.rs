//! WASM bindings for the navigation generator.
//!
//! Lets a browser-side configurator run the same merge as the CLI.
//! Build with: `wasm-pack build --target web --features wasm`

use wasm_bindgen::prelude::*;

use crate::codegen::NavOutput;
use crate::config::NavConfig;
use crate::template::BaseTemplate;
use crate::update::ConfigUpdate;

fn js_error(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

fn output_object(output: &NavOutput) -> JsValue {
    let obj = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&obj, &"html".into(), &JsValue::from_str(&output.html));
    let _ = js_sys::Reflect::set(&obj, &"css".into(), &JsValue::from_str(&output.css));
    let warnings = js_sys::Array::new();
    for w in &output.warnings {
        warnings.push(&JsValue::from_str(w));
    }
    let _ = js_sys::Reflect::set(&obj, &"warnings".into(), &warnings.into());
    obj.into()
}

/// Merge a configuration (JSON text) into the base template.
///
/// Returns `{ html, css, warnings }`, or throws on a malformed template,
/// a missing marker, or invalid JSON.
#[wasm_bindgen(js_name = generateNav)]
pub fn generate_nav(html: &str, css: &str, config_json: &str) -> Result<JsValue, JsError> {
    let output = crate::generate_from_json(html, css, config_json).map_err(js_error)?;
    Ok(output_object(&output))
}

/// Same as [`generate_nav`], taking the configuration as a plain JS object.
#[wasm_bindgen(js_name = generateNavFromObject)]
pub fn generate_nav_from_object(html: &str, css: &str, config: JsValue) -> Result<JsValue, JsError> {
    let config: NavConfig = serde_wasm_bindgen::from_value(config).map_err(js_error)?;
    let output = crate::codegen::generate(&BaseTemplate::new(html, css), &config).map_err(js_error)?;
    Ok(output_object(&output))
}

/// The starting configuration as a JS object.
#[wasm_bindgen(js_name = defaultConfig)]
pub fn default_config() -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(&NavConfig::default()).map_err(js_error)
}

/// Apply one form-field change to a configuration and return the new
/// configuration as JSON text. The input is left untouched.
#[wasm_bindgen(js_name = applyField)]
pub fn apply_field(config_json: &str, field: &str, value: &str) -> Result<String, JsError> {
    let config = NavConfig::from_json(config_json).map_err(js_error)?;
    let update = ConfigUpdate::from_field(field, value).map_err(js_error)?;
    config
        .apply(update)
        .and_then(|next| next.to_json())
        .map_err(js_error)
}

/// Template problems that would not stop generation, as a string array.
#[wasm_bindgen(js_name = validateTemplate)]
pub fn validate_template(html: &str, css: &str) -> Result<JsValue, JsError> {
    let warnings =
        crate::codegen::validate_template(&BaseTemplate::new(html, css)).map_err(js_error)?;
    let array = js_sys::Array::new();
    for w in &warnings {
        array.push(&JsValue::from_str(w));
    }
    Ok(array.into())
}
