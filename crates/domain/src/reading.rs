//! Sensor readings — one measurement row as reported by the backend.

use serde::{Deserialize, Serialize};

/// A single measurement from one sensor.
///
/// `relay_id == sensor_id` marks the relay's own onboard sensor; the
/// distinction matters for display only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub relay_id: String,
    pub sensor_id: String,
    #[serde(with = "lenient_f64")]
    pub temp: f64,
    #[serde(with = "lenient_f64")]
    pub humid: f64,
    #[serde(with = "lenient_f64")]
    pub soil: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl SensorReading {
    /// Whether this row is the relay's onboard sensor.
    #[must_use]
    pub fn is_relay_sensor(&self) -> bool {
        self.relay_id == self.sensor_id
    }
}

/// Accepts numbers or numeric strings; anything unparsable becomes `NaN`.
///
/// The backend persists measurements through CSV, so values occasionally
/// arrive as strings. An unparsable field classifies as in-bounds, since
/// every threshold comparison against `NaN` is false.
mod lenient_f64 {
    use serde::de::{Deserializer, Error as _};
    use serde::ser::Serializer;
    use serde::Deserialize;

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(*value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        match value {
            serde_json::Value::Number(num) => Ok(num.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(text) => Ok(text.trim().parse().unwrap_or(f64::NAN)),
            serde_json::Value::Null => Ok(f64::NAN),
            other => Err(D::Error::custom(format!(
                "expected number or string, got {other}"
            ))),
        }
    }
}
