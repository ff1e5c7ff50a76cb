//! `starwisp` module implementation for QuickJS.
//!
//! Exposes the diagnostic bridge to scripts as a global `starwisp` object.
//! `starwisp.report(value)` stores the stringified value in the shared slot;
//! the shell inspects the slot after each top-level evaluation.

use rquickjs::{Ctx, Function, Object, Result, Value};

use super::display_value;
use crate::bridge::DiagnosticBridge;

/// Register the `starwisp` module in the QuickJS context.
pub fn register(ctx: &Ctx<'_>, bridge: DiagnosticBridge) -> Result<()> {
    let globals = ctx.globals();

    let starwisp = Object::new(ctx.clone())?;

    starwisp.set(
        "report",
        Function::new(ctx.clone(), move |value: Value<'_>| {
            bridge.publish(display_value(&value));
        })?,
    )?;

    globals.set("starwisp", starwisp)?;

    Ok(())
}
