//! Boot configuration.
//!
//! An optional `starwisp.json` in the working directory overrides where the
//! script layers and the diagnostic log live. A missing or unparseable file
//! falls back to the defaults, so configuration is never required to boot.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::pipeline::ScriptLayer;

/// Optional configuration file read from the working directory.
pub const CONFIG_FILE: &str = "starwisp.json";

/// The fixed layer order: core primitives, library definitions,
/// application logic.
pub const LAYER_NAMES: [&str; 3] = ["init", "lib", "starwisp"];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BootConfig {
    /// Directory holding the script layer files.
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,
    /// Destination for the interpreter's display output.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            assets_dir: default_assets_dir(),
            log_file: default_log_file(),
        }
    }
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("assets")
}

fn default_log_file() -> PathBuf {
    PathBuf::from("starwisp-log.txt")
}

impl BootConfig {
    /// Load the config file if present; fall back to defaults otherwise.
    pub fn load(path: &Path) -> BootConfig {
        if !path.exists() {
            return BootConfig::default();
        }
        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                eprintln!("[Starwisp] Failed to parse {}: {}", path.display(), e);
                BootConfig::default()
            }),
            Err(e) => {
                eprintln!("[Starwisp] Failed to read {}: {}", path.display(), e);
                BootConfig::default()
            }
        }
    }

    /// The ordered script layers derived from the assets directory.
    pub fn layers(&self) -> Vec<ScriptLayer> {
        LAYER_NAMES
            .iter()
            .map(|name| ScriptLayer::new(*name, self.assets_dir.join(format!("{}.js", name))))
            .collect()
    }
}
