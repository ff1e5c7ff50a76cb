//! `console` module implementation for QuickJS.
//!
//! Routes the interpreter's own display output (`console.log` and friends)
//! into the session's output sink file rather than the native stderr, which
//! stays reserved for the shell's diagnostics.

use rquickjs::function::Rest;
use rquickjs::{Ctx, Function, Object, Result, Value};

use super::display_value;
use super::runtime::SharedSink;

/// Register the `console` module in the QuickJS context.
pub fn register(ctx: &Ctx<'_>, sink: SharedSink) -> Result<()> {
    let globals = ctx.globals();

    let console = Object::new(ctx.clone())?;

    let out = sink.clone();
    console.set(
        "log",
        Function::new(ctx.clone(), move |args: Rest<Value<'_>>| {
            write_line(&out, &join_args(&args.0));
        })?,
    )?;

    let out = sink.clone();
    console.set(
        "info",
        Function::new(ctx.clone(), move |args: Rest<Value<'_>>| {
            write_line(&out, &join_args(&args.0));
        })?,
    )?;

    let out = sink.clone();
    console.set(
        "warn",
        Function::new(ctx.clone(), move |args: Rest<Value<'_>>| {
            write_line(&out, &format!("WARN: {}", join_args(&args.0)));
        })?,
    )?;

    let out = sink;
    console.set(
        "error",
        Function::new(ctx.clone(), move |args: Rest<Value<'_>>| {
            write_line(&out, &format!("ERROR: {}", join_args(&args.0)));
        })?,
    )?;

    globals.set("console", console)?;

    Ok(())
}

fn write_line(sink: &SharedSink, line: &str) {
    if let Ok(mut sink) = sink.lock() {
        sink.write_line(line);
    }
}

fn join_args(args: &[Value<'_>]) -> String {
    args.iter().map(display_value).collect::<Vec<_>>().join(" ")
}
