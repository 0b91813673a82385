//! Relay records — field gateways aggregating one or more sensors.

use serde::{Deserialize, Serialize};

/// One registered relay, as reported by the backend.
///
/// The backend owns these records; the dashboard holds a read-mostly cached
/// copy that is replaced on every list reload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayRecord {
    pub relay_id: String,
    /// Sensors managed by this relay, in registration order.
    pub sensor_ids: Vec<String>,
    /// Per-relay sampling cycle in seconds, always >= 1.
    pub delta_t: u32,
}
