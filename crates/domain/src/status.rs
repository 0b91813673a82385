//! System run status — running flag, selection, and the last-applied cycle.

use serde::{Deserialize, Serialize};

/// Process-wide run state as reported by `GET /api/status`.
///
/// `running` gates every relay-editing operation; it is set by start/stop
/// replies and status reloads, never inferred locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemStatus {
    pub running: bool,
    #[serde(default)]
    pub selected_relays: Vec<String>,
    /// Last-applied system-wide scheduling period (T) in seconds.
    #[serde(default = "default_total_cycle")]
    pub total_cycle: u32,
}

impl Default for SystemStatus {
    fn default() -> Self {
        Self {
            running: false,
            selected_relays: Vec::new(),
            total_cycle: default_total_cycle(),
        }
    }
}

fn default_total_cycle() -> u32 {
    120
}
