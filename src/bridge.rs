//! Script-to-native diagnostic bridge.
//!
//! A single nullable slot the scripting side publishes status values into
//! (via the global `starwisp.report(...)`). The native side reads the slot
//! after each evaluation and forwards a set value to stderr. The bridge
//! never clears the slot itself; overwriting stale values is up to the
//! scripts. An unset slot means "nothing to report", never an error.

use std::sync::{Arc, Mutex};

/// Cloneable handle to the shared diagnostic slot.
#[derive(Clone, Default)]
pub struct DiagnosticBridge {
    slot: Arc<Mutex<Option<String>>>,
}

impl DiagnosticBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the slot with a new status value.
    pub fn publish(&self, value: String) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(value);
        }
    }

    /// Read the slot without clearing it.
    pub fn peek(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}
