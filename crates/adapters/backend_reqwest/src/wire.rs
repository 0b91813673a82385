//! Wire types — JSON reply shapes of the monitor API.
//!
//! Every reply carries `success: bool` with an `error` string on failure;
//! `into_domain` funnels that convention into [`MonitorError::Backend`] so
//! callers never see a half-populated reply.

use serde::Deserialize;

use cropdash_domain::error::MonitorError;
use cropdash_domain::history::SensorHistory;
use cropdash_domain::reading::SensorReading;
use cropdash_domain::relay::RelayRecord;
use cropdash_domain::status::SystemStatus;
use cropdash_domain::threshold::ThresholdSet;

fn check(success: bool, error: Option<String>) -> Result<(), MonitorError> {
    if success {
        Ok(())
    } else {
        Err(MonitorError::backend(error))
    }
}

/// `GET /api/status`
#[derive(Debug, Deserialize)]
pub struct StatusReply {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub running: bool,
    #[serde(default)]
    pub selected_relays: Vec<String>,
    #[serde(default = "default_total_cycle")]
    pub total_cycle: u32,
}

fn default_total_cycle() -> u32 {
    120
}

impl StatusReply {
    pub fn into_domain(self) -> Result<SystemStatus, MonitorError> {
        check(self.success, self.error)?;
        Ok(SystemStatus {
            running: self.running,
            selected_relays: self.selected_relays,
            total_cycle: self.total_cycle,
        })
    }
}

/// `GET /api/relays`
#[derive(Debug, Deserialize)]
pub struct RelaysReply {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub relays: Vec<RelayRecord>,
}

impl RelaysReply {
    pub fn into_domain(self) -> Result<Vec<RelayRecord>, MonitorError> {
        check(self.success, self.error)?;
        Ok(self.relays)
    }
}

/// Bare acknowledgment (delete, update_cycle, start, stop).
#[derive(Debug, Deserialize)]
pub struct AckReply {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl AckReply {
    pub fn into_domain(self) -> Result<(), MonitorError> {
        check(self.success, self.error)
    }
}

/// `GET`/`POST /api/thresholds`
#[derive(Debug, Deserialize)]
pub struct ThresholdsReply {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    pub thresholds: Option<ThresholdSet>,
}

impl ThresholdsReply {
    pub fn into_domain(self) -> Result<ThresholdSet, MonitorError> {
        check(self.success, self.error)?;
        self.thresholds.ok_or_else(|| MonitorError::Backend {
            message: "reply missing thresholds".to_string(),
        })
    }
}

/// `GET /api/data`
#[derive(Debug, Deserialize)]
pub struct SnapshotReply {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub data: Vec<SensorReading>,
}

impl SnapshotReply {
    pub fn into_domain(self) -> Result<Vec<SensorReading>, MonitorError> {
        check(self.success, self.error)?;
        Ok(self.data)
    }
}

/// `GET /api/sensor/{relay}/{sensor}`
#[derive(Debug, Deserialize)]
pub struct HistoryReply {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub relay_id: String,
    #[serde(default)]
    pub sensor_id: String,
    #[serde(default)]
    pub is_relay: bool,
    /// `null` for plain sensors.
    #[serde(default)]
    pub managed_sensors: Option<Vec<String>>,
    #[serde(default)]
    pub history: Vec<SensorReading>,
}

impl HistoryReply {
    pub fn into_domain(self) -> Result<SensorHistory, MonitorError> {
        check(self.success, self.error)?;
        Ok(SensorHistory {
            relay_id: self.relay_id,
            sensor_id: self.sensor_id,
            is_relay: self.is_relay,
            managed_sensors: self.managed_sensors.unwrap_or_default(),
            history: self.history,
        })
    }
}
