//! Backend port — the monitor's HTTP API as seen by the application core.

use std::future::Future;

use cropdash_domain::error::MonitorError;
use cropdash_domain::history::SensorHistory;
use cropdash_domain::reading::SensorReading;
use cropdash_domain::relay::RelayRecord;
use cropdash_domain::status::SystemStatus;
use cropdash_domain::threshold::ThresholdSet;
use cropdash_domain::time_range::TimeRange;

/// Outbound port for the monitor backend.
///
/// One method per API operation. Implementations perform no retries and
/// configure no timeouts; a hung request simply never resolves and the
/// corresponding user action never completes.
pub trait MonitorBackend {
    /// `GET /api/status` — running flag, selected relays, total cycle.
    fn fetch_status(&self) -> impl Future<Output = Result<SystemStatus, MonitorError>> + Send;

    /// `GET /api/relays` — registered relays with sensors and Δt.
    fn fetch_relays(&self) -> impl Future<Output = Result<Vec<RelayRecord>, MonitorError>> + Send;

    /// `DELETE /api/relay/{id}` — remove a relay registration.
    fn delete_relay(
        &self,
        relay_id: &str,
    ) -> impl Future<Output = Result<(), MonitorError>> + Send;

    /// `POST /api/update_cycle` — change one relay's Δt.
    fn update_cycle(
        &self,
        relay_id: &str,
        delta_t: u32,
    ) -> impl Future<Output = Result<(), MonitorError>> + Send;

    /// `POST /api/start` — begin monitoring the selected relays.
    fn start(
        &self,
        selected_relays: &[String],
        total_cycle: u32,
    ) -> impl Future<Output = Result<(), MonitorError>> + Send;

    /// `POST /api/stop` — stop monitoring.
    fn stop(&self) -> impl Future<Output = Result<(), MonitorError>> + Send;

    /// `GET /api/thresholds` — the active six-field threshold set.
    fn fetch_thresholds(&self)
    -> impl Future<Output = Result<ThresholdSet, MonitorError>> + Send;

    /// `POST /api/thresholds` — replace the threshold set wholesale.
    /// Returns the set now active on the backend.
    fn save_thresholds(
        &self,
        set: &ThresholdSet,
    ) -> impl Future<Output = Result<ThresholdSet, MonitorError>> + Send;

    /// `GET /api/data` — current reading snapshot for all known sensors.
    fn fetch_snapshot(
        &self,
    ) -> impl Future<Output = Result<Vec<SensorReading>, MonitorError>> + Send;

    /// `GET /api/sensor/{relay}/{sensor}?time_range=` — reading history.
    fn fetch_history(
        &self,
        relay_id: &str,
        sensor_id: &str,
        time_range: TimeRange,
    ) -> impl Future<Output = Result<SensorHistory, MonitorError>> + Send;
}
