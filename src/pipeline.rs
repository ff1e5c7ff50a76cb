//! Script layer pipeline.
//!
//! Boots the application by evaluating the ordered script layers against
//! one interpreter session: core primitives (`init`), then library
//! definitions (`lib`), then application logic (`starwisp`). Layers run
//! unconditionally in order: a missing file degrades to evaluating empty
//! source, and a failed evaluation is recorded rather than aborting, so
//! boot is best-effort. Every outcome lands in a [`BootReport`].

use std::path::PathBuf;

use crate::loader;
use crate::quickjs::ScriptSession;

/// One ordered, named unit of script source.
#[derive(Clone, Debug)]
pub struct ScriptLayer {
    pub name: String,
    pub path: PathBuf,
}

impl ScriptLayer {
    pub fn new(name: impl Into<String>, path: PathBuf) -> Self {
        Self {
            name: name.into(),
            path,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded { bytes: usize },
    Missing,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalStatus {
    Ok,
    Failed(String),
}

/// What happened to a single layer during boot.
#[derive(Clone, Debug)]
pub struct LayerReport {
    pub name: String,
    pub path: PathBuf,
    pub load: LoadStatus,
    pub eval: EvalStatus,
    /// Whether the liveness probe after the layer still evaluated cleanly.
    pub probe_ok: bool,
    /// The bridge value observed after the layer's evaluation, if any.
    pub bridge: Option<String>,
}

/// Structured outcome of a whole boot run.
#[derive(Clone, Debug, Default)]
pub struct BootReport {
    pub layers: Vec<LayerReport>,
}

impl BootReport {
    /// True when every layer loaded, evaluated, and probed cleanly.
    pub fn fully_loaded(&self) -> bool {
        self.layers.iter().all(|layer| {
            matches!(layer.load, LoadStatus::Loaded { .. })
                && layer.eval == EvalStatus::Ok
                && layer.probe_ok
        })
    }

    /// Write one summary line per layer to stderr.
    pub fn log_summary(&self) {
        for layer in &self.layers {
            let load = match &layer.load {
                LoadStatus::Loaded { bytes } => format!("{} bytes", bytes),
                LoadStatus::Missing => "missing".to_string(),
            };
            let eval = match &layer.eval {
                EvalStatus::Ok => "ok",
                EvalStatus::Failed(_) => "failed",
            };
            let probe = if layer.probe_ok { "ok" } else { "failed" };
            eprintln!(
                "[Starwisp] layer {}: load {}, eval {}, probe {}",
                layer.name, load, eval, probe
            );
        }
    }
}

/// Evaluate the layers in order against the session.
///
/// Never short-circuits: every layer is loaded and evaluated regardless of
/// what happened to the layers before it. After each layer the bridge slot
/// is inspected (a set value goes to stderr) and a trivial probe evaluation
/// confirms the session is still live.
pub fn run_boot(session: &ScriptSession, layers: &[ScriptLayer]) -> BootReport {
    let mut report = BootReport::default();

    for layer in layers {
        let missing = !layer.path.exists();
        let source = loader::load_script_file(&layer.path);
        let load = if missing {
            LoadStatus::Missing
        } else {
            LoadStatus::Loaded {
                bytes: source.len(),
            }
        };

        let eval = match session.evaluate(&source) {
            Ok(()) => EvalStatus::Ok,
            Err(message) => {
                eprintln!("[Starwisp] layer {} failed: {}", layer.name, message);
                EvalStatus::Failed(message)
            }
        };

        let bridge = session.bridge().peek();
        if let Some(value) = &bridge {
            eprintln!("[Starwisp] script: {}", value);
        }

        let probe_ok = session
            .evaluate(&format!("console.log(\"loaded {}\")", layer.name))
            .is_ok();

        report.layers.push(LayerReport {
            name: layer.name.clone(),
            path: layer.path.clone(),
            load,
            eval,
            probe_ok,
            bridge,
        });
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::DiagnosticBridge;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn session_in(dir: &Path) -> ScriptSession {
        ScriptSession::new(&dir.join("starwisp-log.txt"), DiagnosticBridge::new()).unwrap()
    }

    fn layer(dir: &Path, name: &str, source: &str) -> ScriptLayer {
        let path = dir.join(format!("{}.js", name));
        fs::write(&path, source).unwrap();
        ScriptLayer::new(name, path)
    }

    #[test]
    fn test_layers_see_earlier_definitions() {
        let dir = tempdir().unwrap();
        let session = session_in(dir.path());
        let layers = vec![
            layer(dir.path(), "init", "var base = 40;"),
            layer(dir.path(), "lib", "function f() { return base + 2; }"),
            layer(dir.path(), "starwisp", "starwisp.report(f())"),
        ];

        let report = run_boot(&session, &layers);

        assert!(report.fully_loaded());
        assert_eq!(report.layers[2].bridge, Some("42".to_string()));
    }

    #[test]
    fn test_reversed_order_fails_inside_the_interpreter() {
        let dir = tempdir().unwrap();
        let session = session_in(dir.path());
        let layers = vec![
            layer(dir.path(), "starwisp", "starwisp.report(f())"),
            layer(dir.path(), "lib", "function f() { return 42; }"),
            layer(dir.path(), "init", "var base = 40;"),
        ];

        let report = run_boot(&session, &layers);

        assert!(matches!(report.layers[0].eval, EvalStatus::Failed(_)));
        // the failure does not stop the remaining layers
        assert_eq!(report.layers.len(), 3);
        assert_eq!(report.layers[1].eval, EvalStatus::Ok);
        assert_eq!(report.layers[2].eval, EvalStatus::Ok);
    }

    #[test]
    fn test_missing_files_never_short_circuit() {
        let dir = tempdir().unwrap();
        let session = session_in(dir.path());
        let layers = vec![
            ScriptLayer::new("init", dir.path().join("init.js")),
            ScriptLayer::new("lib", dir.path().join("lib.js")),
            ScriptLayer::new("starwisp", dir.path().join("starwisp.js")),
        ];

        let report = run_boot(&session, &layers);

        assert_eq!(report.layers.len(), 3);
        for layer in &report.layers {
            assert_eq!(layer.load, LoadStatus::Missing);
            assert_eq!(layer.eval, EvalStatus::Ok);
            assert!(layer.probe_ok);
        }
        assert!(!report.fully_loaded());
    }

    #[test]
    fn test_zero_length_layer_counts_as_loaded() {
        let dir = tempdir().unwrap();
        let session = session_in(dir.path());
        let layers = vec![layer(dir.path(), "init", "")];

        let report = run_boot(&session, &layers);

        assert_eq!(report.layers[0].load, LoadStatus::Loaded { bytes: 0 });
        assert_eq!(report.layers[0].eval, EvalStatus::Ok);
    }

    #[test]
    fn test_bridge_value_is_sticky_across_layers() {
        let dir = tempdir().unwrap();
        let session = session_in(dir.path());
        let layers = vec![
            layer(dir.path(), "init", "starwisp.report(\"ready\")"),
            // missing layer evaluates empty source, which must not disturb the slot
            ScriptLayer::new("lib", dir.path().join("lib.js")),
        ];

        let report = run_boot(&session, &layers);

        assert_eq!(report.layers[0].bridge, Some("ready".to_string()));
        assert_eq!(report.layers[1].bridge, Some("ready".to_string()));
    }

    #[test]
    fn test_sink_accumulates_probe_markers_in_order() {
        let dir = tempdir().unwrap();
        let session = session_in(dir.path());
        let layers = vec![
            layer(dir.path(), "init", ""),
            layer(dir.path(), "lib", ""),
            layer(dir.path(), "starwisp", ""),
        ];

        run_boot(&session, &layers);

        let log = fs::read_to_string(dir.path().join("starwisp-log.txt")).unwrap();
        let init = log.find("loaded init").unwrap();
        let lib = log.find("loaded lib").unwrap();
        let starwisp = log.find("loaded starwisp").unwrap();
        assert!(init < lib && lib < starwisp);
    }
}
