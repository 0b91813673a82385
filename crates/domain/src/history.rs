//! Sensor history — the detail view's backing data.

use serde::{Deserialize, Serialize};

use crate::reading::SensorReading;

/// History reply for one sensor (or a relay's onboard sensor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorHistory {
    pub relay_id: String,
    pub sensor_id: String,
    /// Whether this is the relay's own onboard sensor.
    pub is_relay: bool,
    /// Sensors managed by the relay; empty for plain sensors.
    /// The backend sends `null` here for non-relay rows.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub managed_sensors: Vec<String>,
    /// Samples, newest first.
    pub history: Vec<SensorReading>,
}

impl SensorHistory {
    /// The most recent sample, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&SensorReading> {
        self.history.first()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<Vec<String>> = serde::Deserialize::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}
