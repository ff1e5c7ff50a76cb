//! starwisp: a native application shell that embeds QuickJS.
//!
//! The shell owns one interpreter session for the process lifetime and
//! builds the application's behavior at runtime by evaluating three script
//! layers in order: core primitives (`init`), library definitions (`lib`),
//! application logic (`starwisp`). Boot is best-effort: a missing or
//! failing layer is reported and the remaining layers still run.

use std::path::Path;

pub mod bridge;
pub mod config;
pub mod loader;
pub mod pipeline;
pub mod quickjs;
pub mod store;

use bridge::DiagnosticBridge;
use config::BootConfig;
use quickjs::ScriptSession;

/// Boot the shell: load config, stand up the interpreter session, run the
/// script layer pipeline, log the outcome. Never fails the process; the
/// caller exits with success status regardless of what happened here.
pub fn run() {
    let config = BootConfig::load(Path::new(config::CONFIG_FILE));

    let session = match ScriptSession::new(&config.log_file, DiagnosticBridge::new()) {
        Ok(session) => session,
        Err(message) => {
            eprintln!("[Starwisp] failed to start interpreter: {}", message);
            return;
        }
    };

    let report = pipeline::run_boot(&session, &config.layers());
    report.log_summary();
}
