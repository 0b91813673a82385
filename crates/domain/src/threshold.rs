//! Alert thresholds — min/max bound per measured dimension.

use serde::{Deserialize, Serialize};

use crate::classification::Dimension;

/// The six alert bounds, replaced wholesale on every save.
///
/// `*_min <= *_max` is the caller's responsibility; the system never
/// enforces it and classification simply flags everything outside the
/// (possibly empty) interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSet {
    pub temp_min: f64,
    pub temp_max: f64,
    pub humid_min: f64,
    pub humid_max: f64,
    pub soil_min: f64,
    pub soil_max: f64,
}

impl ThresholdSet {
    /// The `[min, max]` interval for one dimension.
    #[must_use]
    pub fn bounds(&self, dimension: Dimension) -> (f64, f64) {
        match dimension {
            Dimension::Temperature => (self.temp_min, self.temp_max),
            Dimension::Humidity => (self.humid_min, self.humid_max),
            Dimension::SoilMoisture => (self.soil_min, self.soil_max),
        }
    }
}

impl Default for ThresholdSet {
    fn default() -> Self {
        Self {
            temp_min: 18.0,
            temp_max: 32.0,
            humid_min: 40.0,
            humid_max: 80.0,
            soil_min: 20.0,
            soil_max: 70.0,
        }
    }
}
