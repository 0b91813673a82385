//! Status classification — maps one reading against the thresholds.
//!
//! Both the aggregate table and the detail view depend on this exact
//! classification for color-coding, so the rules live in one place.

use serde::{Deserialize, Serialize};

use crate::reading::SensorReading;
use crate::threshold::ThresholdSet;

/// A measured dimension, in the fixed reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Temperature,
    Humidity,
    SoilMoisture,
}

impl Dimension {
    /// All dimensions in reporting order: temperature, humidity, soil moisture.
    pub const ALL: [Self; 3] = [Self::Temperature, Self::Humidity, Self::SoilMoisture];

    /// Human-readable label used in alert messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::SoilMoisture => "soil moisture",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Alert severity derived from the number of flagged dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    #[default]
    Normal,
    Warning,
    Danger,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => f.write_str("NORMAL"),
            Self::Warning => f.write_str("WARNING"),
            Self::Danger => f.write_str("DANGER"),
        }
    }
}

/// Derived classification — never stored, recomputed per render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusClassification {
    pub severity: Severity,
    /// Flagged dimensions, always in [`Dimension::ALL`] order.
    pub triggered: Vec<Dimension>,
}

impl StatusClassification {
    /// Message for the status cell: `NORMAL`, or the severity followed by
    /// the flagged dimensions in fixed order.
    #[must_use]
    pub fn message(&self) -> String {
        if self.triggered.is_empty() {
            return self.severity.to_string();
        }
        let labels: Vec<&str> = self.triggered.iter().map(|d| d.label()).collect();
        format!("{}: {}", self.severity, labels.join(", "))
    }
}

/// Classify one reading against the active thresholds.
///
/// A dimension is flagged iff its value lies strictly outside the closed
/// interval `[min, max]`; values exactly on a bound are never flagged, and
/// `NaN` never compares true so unparsable values count as in-bounds.
#[must_use]
pub fn classify(reading: &SensorReading, thresholds: &ThresholdSet) -> StatusClassification {
    let values = [reading.temp, reading.humid, reading.soil];
    let mut triggered = Vec::new();
    for (dimension, value) in Dimension::ALL.into_iter().zip(values) {
        let (min, max) = thresholds.bounds(dimension);
        if value < min || value > max {
            triggered.push(dimension);
        }
    }

    let severity = match triggered.len() {
        0 => Severity::Normal,
        1 => Severity::Warning,
        _ => Severity::Danger,
    };

    StatusClassification {
        severity,
        triggered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(temp: f64, humid: f64, soil: f64) -> SensorReading {
        SensorReading {
            relay_id: "R1".to_string(),
            sensor_id: "S1".to_string(),
            temp,
            humid,
            soil,
            timestamp: None,
        }
    }

    fn thresholds() -> ThresholdSet {
        ThresholdSet {
            temp_min: 18.0,
            temp_max: 32.0,
            humid_min: 40.0,
            humid_max: 80.0,
            soil_min: 20.0,
            soil_max: 70.0,
        }
    }

    #[test]
    fn should_classify_in_bounds_reading_as_normal() {
        let status = classify(&reading(25.0, 60.0, 45.0), &thresholds());
        assert_eq!(status.severity, Severity::Normal);
        assert!(status.triggered.is_empty());
        assert_eq!(status.message(), "NORMAL");
    }

    #[test]
    fn should_warn_when_exactly_one_dimension_is_out() {
        let status = classify(&reading(35.0, 50.0, 30.0), &thresholds());
        assert_eq!(status.severity, Severity::Warning);
        assert_eq!(status.triggered, vec![Dimension::Temperature]);
        assert_eq!(status.message(), "WARNING: temperature");
    }

    #[test]
    fn should_escalate_to_danger_with_two_flags_in_fixed_order() {
        let status = classify(&reading(35.0, 90.0, 30.0), &thresholds());
        assert_eq!(status.severity, Severity::Danger);
        assert_eq!(
            status.triggered,
            vec![Dimension::Temperature, Dimension::Humidity]
        );
        assert_eq!(status.message(), "DANGER: temperature, humidity");
    }

    #[test]
    fn should_escalate_to_danger_with_three_flags() {
        let status = classify(&reading(0.0, 0.0, 0.0), &thresholds());
        assert_eq!(status.severity, Severity::Danger);
        assert_eq!(status.triggered, Dimension::ALL.to_vec());
    }

    #[test]
    fn should_never_flag_boundary_values() {
        let status = classify(&reading(32.0, 40.0, 70.0), &thresholds());
        assert_eq!(status.severity, Severity::Normal);
    }

    #[test]
    fn should_treat_nan_as_in_bounds() {
        let status = classify(&reading(f64::NAN, f64::NAN, f64::NAN), &thresholds());
        assert_eq!(status.severity, Severity::Normal);
    }

    #[test]
    fn should_flag_low_values_too() {
        let status = classify(&reading(17.9, 50.0, 30.0), &thresholds());
        assert_eq!(status.severity, Severity::Warning);
        assert_eq!(status.triggered, vec![Dimension::Temperature]);
    }

    #[test]
    fn should_report_soil_moisture_label() {
        let status = classify(&reading(25.0, 60.0, 99.0), &thresholds());
        assert_eq!(status.message(), "WARNING: soil moisture");
    }
}
