//! Interpreter session for the starwisp shell.
//!
//! The session owns one QuickJS runtime and context for the process
//! lifetime; it is created once at startup and never rebuilt, so side
//! effects of earlier evaluations (defined bindings, loaded state) carry
//! over into later ones.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};

use rquickjs::{Context, Ctx, Runtime};

use super::{bridge_module, console_module};
use crate::bridge::DiagnosticBridge;

/// Destination file for the interpreter's own display output.
///
/// Opened (truncating) once when the session is created, then only appended
/// to and flushed. Opening is a soft dependency: if the file cannot be
/// created the sink stays disabled and display output is dropped.
pub struct OutputSink {
    file: Option<File>,
}

/// Sink handle shared with the JavaScript-facing `console` bindings.
pub type SharedSink = Arc<Mutex<OutputSink>>;

impl OutputSink {
    pub fn open(path: &Path) -> Self {
        Self {
            file: File::create(path).ok(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.file.is_some()
    }

    pub fn write_line(&mut self, line: &str) {
        if let Some(file) = self.file.as_mut() {
            let _ = writeln!(file, "{}", line);
        }
    }

    pub fn flush(&mut self) {
        if let Some(file) = self.file.as_mut() {
            let _ = file.flush();
        }
    }
}

/// Interpreter session state.
pub struct ScriptSession {
    runtime: Runtime,
    context: Context,
    sink: SharedSink,
    bridge: DiagnosticBridge,
}

impl ScriptSession {
    /// Create the session: runtime, context, output sink, native modules.
    pub fn new(log_path: &Path, bridge: DiagnosticBridge) -> Result<Self, String> {
        let runtime =
            Runtime::new().map_err(|e| format!("Failed to create QuickJS runtime: {:?}", e))?;

        // 64MB is plenty for the boot layers
        runtime.set_memory_limit(64 * 1024 * 1024);

        let context = Context::full(&runtime)
            .map_err(|e| format!("Failed to create QuickJS context: {:?}", e))?;

        let sink = Arc::new(Mutex::new(OutputSink::open(log_path)));

        let session = Self {
            runtime,
            context,
            sink,
            bridge,
        };
        session.init_modules()?;

        Ok(session)
    }

    /// Wire the native modules into the JavaScript globals.
    fn init_modules(&self) -> Result<(), String> {
        self.context.with(|ctx| {
            console_module::register(&ctx, self.sink.clone())
                .map_err(|e| format!("Failed to register console module: {:?}", e))?;

            bridge_module::register(&ctx, self.bridge.clone())
                .map_err(|e| format!("Failed to register starwisp module: {:?}", e))?;

            Ok(())
        })
    }

    /// The diagnostic bridge scripts publish into.
    pub fn bridge(&self) -> &DiagnosticBridge {
        &self.bridge
    }

    /// Whether the output sink file was opened successfully.
    pub fn sink_active(&self) -> bool {
        self.sink.lock().map(|sink| sink.is_active()).unwrap_or(false)
    }

    /// Evaluate a complete unit of script source, synchronously, on the
    /// calling thread.
    ///
    /// The sink is flushed after every evaluation so partial output is not
    /// lost if the process terminates abnormally. Failures come back as the
    /// text of the thrown exception; the session itself stays usable.
    pub fn evaluate(&self, source: &str) -> Result<(), String> {
        let result = self.context.with(|ctx| {
            ctx.eval::<(), _>(source)
                .map_err(|err| describe_eval_error(&ctx, err))
        });

        let jobs = self.run_pending_jobs();

        if let Ok(mut sink) = self.sink.lock() {
            sink.flush();
        }

        result.and(jobs)
    }

    /// Run pending JavaScript jobs queued by the last evaluation.
    fn run_pending_jobs(&self) -> Result<(), String> {
        loop {
            if !self.runtime.is_job_pending() {
                break;
            }
            self.runtime
                .execute_pending_job()
                .map_err(|e| format!("Job execution error: {:?}", e))?;
        }
        Ok(())
    }
}

/// Turn an eval failure into the text of the thrown exception.
fn describe_eval_error(ctx: &Ctx<'_>, err: rquickjs::Error) -> String {
    match err {
        rquickjs::Error::Exception => {
            let thrown = ctx.catch();
            if let Some(obj) = thrown.as_object() {
                if let Ok(message) = obj.get::<_, String>("message") {
                    return format!("Uncaught exception: {}", message);
                }
            }
            format!("Uncaught exception: {:?}", thrown)
        }
        other => format!("Eval error: {:?}", other),
    }
}
