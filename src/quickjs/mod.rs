//! QuickJS embedding for the starwisp shell.
//!
//! This module owns the one interpreter instance the shell drives for the
//! whole process. It wires the native side into the JavaScript globals:
//!
//! - `console` module: the interpreter's display output, written to the
//!   session's output sink file
//! - `starwisp` module: the diagnostic bridge, letting scripts publish a
//!   status value back to the native layer
//!
//! Script layers are evaluated against the one shared context, so bindings
//! defined by earlier layers stay visible to later ones.

mod bridge_module;
mod console_module;
mod runtime;

pub use runtime::ScriptSession;

use rquickjs::Value;

/// Coerce a JavaScript value into display text.
///
/// Strings come back verbatim; other primitives use their usual rendering.
pub(crate) fn display_value(value: &Value<'_>) -> String {
    if let Some(text) = value.as_string() {
        text.to_string().unwrap_or_default()
    } else if value.is_undefined() {
        "undefined".to_string()
    } else if value.is_null() {
        "null".to_string()
    } else if let Some(flag) = value.as_bool() {
        flag.to_string()
    } else if let Some(number) = value.as_int() {
        number.to_string()
    } else if let Some(number) = value.as_float() {
        number.to_string()
    } else {
        format!("{:?}", value)
    }
}
