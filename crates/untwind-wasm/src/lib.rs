//! WASM bindings for the untwind converter.
//!
//! Exposes `convert_to_sass()` to JavaScript via wasm-bindgen. Options
//! come in as a plain JS object with the documented camelCase keys and
//! merge over the defaults; the result is `{ sass, html }` or JS `null`
//! when the input has no structural content.

use wasm_bindgen::prelude::*;

use untwind_codegen::ConvertOptions;

/// Convert Tailwind-annotated HTML to a nested SASS stylesheet plus a
/// rewritten HTML skeleton.
///
/// `options` may be `undefined`, `null` or a partial object such as
/// `{ useCommentBlocksAsClassName: false }`. Throws a JS error when the
/// input does not parse or the options object has the wrong shape.
#[wasm_bindgen]
pub fn convert_to_sass(html: &str, options: JsValue) -> Result<JsValue, JsError> {
    let options: ConvertOptions = if options.is_undefined() || options.is_null() {
        ConvertOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| JsError::new(&e.to_string()))?
    };

    let output = untwind_codegen::convert_to_sass(html, &options)
        .map_err(|e| JsError::new(&e.to_string()))?;

    let Some(output) = output else {
        return Ok(JsValue::NULL);
    };

    // Serialize to a plain JS object { sass, html }
    let js_obj = js_sys::Object::new();
    js_sys::Reflect::set(&js_obj, &"sass".into(), &output.sass.into())
        .map_err(|_| JsError::new("Failed to set sass property"))?;
    js_sys::Reflect::set(&js_obj, &"html".into(), &output.html.into())
        .map_err(|_| JsError::new("Failed to set html property"))?;

    Ok(js_obj.into())
}

/// Get the converter version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
