//! Dashboard service — user actions and view loads with their local gates.
//!
//! Every editing operation checks its preconditions *before* touching the
//! network: while the system is running no relay edit is attempted, start
//! requires a non-empty selection and a sane total cycle, Δt must be at
//! least one second, and deletion must be confirmed. Failures of any class
//! are parked in the banner for the next render; no operation retries.

use std::sync::Arc;

use tokio::sync::RwLock;

use cropdash_domain::error::{MonitorError, ValidationError};
use cropdash_domain::threshold::ThresholdSet;
use cropdash_domain::time_range::TimeRange;

use crate::ports::MonitorBackend;
use crate::state::DashboardState;
use crate::view::{ActiveView, Banner, DetailContext};

/// Use-case layer for the three dashboard views.
///
/// Generic over the backend port to avoid dynamic dispatch; tests inject an
/// in-memory recording backend.
pub struct DashboardService<B> {
    backend: B,
    state: Arc<RwLock<DashboardState>>,
}

impl<B: MonitorBackend> DashboardService<B> {
    /// Create a service over a backend and a shared state store.
    pub fn new(backend: B, state: Arc<RwLock<DashboardState>>) -> Self {
        Self { backend, state }
    }

    /// The shared store, for renderers and the polling task.
    #[must_use]
    pub fn state(&self) -> &Arc<RwLock<DashboardState>> {
        &self.state
    }

    /// The backend this service drives.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    // --- startup & view loads ------------------------------------------

    /// Reload the run state and server-side selection (`GET /api/status`).
    ///
    /// Startup tolerates failure here: the dashboard comes up stopped with
    /// an empty selection and self-heals on the next successful load.
    pub async fn load_status(&self) {
        match self.backend.fetch_status().await {
            Ok(status) => {
                let mut state = self.state.write().await;
                state.apply_run_state(status.running, status.total_cycle);
                state.set_selection(status.selected_relays);
            }
            Err(err) => tracing::warn!(error = %err, "failed to load system status"),
        }
    }

    /// Reload the relay list and reconcile the selection.
    ///
    /// # Errors
    ///
    /// Propagates transport/backend failures after parking them in the
    /// banner; the cached list is left untouched.
    pub async fn load_relays(&self) -> Result<(), MonitorError> {
        match self.backend.fetch_relays().await {
            Ok(records) => {
                self.state.write().await.apply_relay_list(records);
                Ok(())
            }
            Err(err) => Err(self.report(err).await),
        }
    }

    /// Reload the threshold set; failures are logged, not surfaced.
    pub async fn load_thresholds(&self) {
        match self.backend.fetch_thresholds().await {
            Ok(set) => self.state.write().await.apply_thresholds(set),
            Err(err) => tracing::warn!(error = %err, "failed to load thresholds"),
        }
    }

    /// Refresh the aggregate reading snapshot (`GET /api/data`).
    ///
    /// Concurrent refreshes race last-writer-wins into the cache; that is
    /// accepted, the next tick overwrites whatever landed.
    ///
    /// # Errors
    ///
    /// Propagates transport/backend failures after parking them in the
    /// banner.
    pub async fn refresh_general(&self) -> Result<(), MonitorError> {
        match self.backend.fetch_snapshot().await {
            Ok(readings) => {
                self.state.write().await.apply_sensor_data(readings);
                Ok(())
            }
            Err(err) => Err(self.report(err).await),
        }
    }

    /// Navigate to the manager view, reloading its backing data.
    ///
    /// # Errors
    ///
    /// Propagates the relay reload failure; the view switches regardless.
    pub async fn show_manager(&self) -> Result<(), MonitorError> {
        self.state.write().await.set_active_view(ActiveView::Manager);
        self.load_relays().await
    }

    /// Navigate to the general view, reloading its backing data.
    ///
    /// # Errors
    ///
    /// Propagates the snapshot refresh failure; the view switches
    /// regardless.
    pub async fn show_general(&self) -> Result<(), MonitorError> {
        self.state.write().await.set_active_view(ActiveView::General);
        self.refresh_general().await
    }

    /// Open the detail view for one sensor over the given time range.
    ///
    /// # Errors
    ///
    /// On failure the current view is kept and the error is parked in the
    /// banner.
    pub async fn open_detail(
        &self,
        relay_id: &str,
        sensor_id: &str,
        time_range: TimeRange,
    ) -> Result<(), MonitorError> {
        match self.backend.fetch_history(relay_id, sensor_id, time_range).await {
            Ok(history) => {
                self.state.write().await.set_detail(DetailContext {
                    history,
                    time_range,
                });
                Ok(())
            }
            Err(err) => Err(self.report(err).await),
        }
    }

    // --- manager actions -----------------------------------------------

    /// Toggle one relay in the selection. Purely local — the selection is
    /// only sent to the backend on start.
    ///
    /// # Errors
    ///
    /// Rejected while the system is running; no network call is made.
    pub async fn toggle_relay(&self, relay_id: &str) -> Result<(), MonitorError> {
        self.guard_not_running().await?;
        self.state.write().await.toggle_selection(relay_id);
        Ok(())
    }

    /// Delete a relay registration from the backend.
    ///
    /// # Errors
    ///
    /// Rejected while running or without confirmation (no network call in
    /// either case); backend failures are parked in the banner.
    pub async fn delete_relay(&self, relay_id: &str, confirmed: bool) -> Result<(), MonitorError> {
        self.guard_not_running().await?;
        if !confirmed {
            return Err(self.reject(ValidationError::ConfirmationRequired).await);
        }

        match self.backend.delete_relay(relay_id).await {
            Ok(()) => {
                {
                    let mut state = self.state.write().await;
                    state.deselect(relay_id);
                    state.set_banner(Banner::success(format!("relay {relay_id} deleted")));
                }
                self.load_relays().await
            }
            Err(err) => Err(self.report(err).await),
        }
    }

    /// Change one relay's sampling cycle.
    ///
    /// # Errors
    ///
    /// Rejected while running or when `delta_t < 1`; backend failures are
    /// parked in the banner.
    pub async fn update_delta(&self, relay_id: &str, delta_t: u32) -> Result<(), MonitorError> {
        self.guard_not_running().await?;
        if delta_t < 1 {
            return Err(self.reject(ValidationError::CycleTooShort).await);
        }

        match self.backend.update_cycle(relay_id, delta_t).await {
            Ok(()) => {
                self.state.write().await.patch_delta_t(relay_id, delta_t);
                tracing::debug!(relay_id, delta_t, "updated relay cycle");
                Ok(())
            }
            Err(err) => Err(self.report(err).await),
        }
    }

    /// Start monitoring the selected relays with the given total cycle.
    ///
    /// # Errors
    ///
    /// Rejected locally when the selection is empty or `total_cycle < 1`
    /// — no `POST /api/start` is issued in either case.
    pub async fn start(&self, total_cycle: u32) -> Result<(), MonitorError> {
        let selection: Vec<String> = self.state.read().await.selection().to_vec();
        if selection.is_empty() {
            return Err(self.reject(ValidationError::EmptySelection).await);
        }
        if total_cycle < 1 {
            return Err(self.reject(ValidationError::TotalCycleTooShort).await);
        }

        match self.backend.start(&selection, total_cycle).await {
            Ok(()) => {
                let mut state = self.state.write().await;
                state.apply_run_state(true, total_cycle);
                state.set_banner(Banner::success(format!(
                    "system started with {} relay(s), T={total_cycle}s",
                    selection.len()
                )));
                Ok(())
            }
            Err(err) => Err(self.report(err).await),
        }
    }

    /// Stop monitoring.
    ///
    /// # Errors
    ///
    /// Backend failures are parked in the banner; the run state is only
    /// cleared on success.
    pub async fn stop(&self) -> Result<(), MonitorError> {
        match self.backend.stop().await {
            Ok(()) => {
                let mut state = self.state.write().await;
                let total_cycle = state.total_cycle();
                state.apply_run_state(false, total_cycle);
                state.set_banner(Banner::success("system stopped"));
                Ok(())
            }
            Err(err) => Err(self.report(err).await),
        }
    }

    /// Replace the threshold set wholesale.
    ///
    /// # Errors
    ///
    /// Backend failures are parked in the banner; the cached set is only
    /// replaced with what the backend echoes back on success.
    pub async fn save_thresholds(&self, set: ThresholdSet) -> Result<(), MonitorError> {
        match self.backend.save_thresholds(&set).await {
            Ok(active) => {
                let mut state = self.state.write().await;
                state.apply_thresholds(active);
                state.set_banner(Banner::success("alert thresholds saved"));
                Ok(())
            }
            Err(err) => Err(self.report(err).await),
        }
    }

    // --- helpers -------------------------------------------------------

    async fn guard_not_running(&self) -> Result<(), MonitorError> {
        if self.state.read().await.running() {
            return Err(self.reject(ValidationError::SystemRunning).await);
        }
        Ok(())
    }

    async fn reject(&self, err: ValidationError) -> MonitorError {
        let err = MonitorError::from(err);
        self.state.write().await.set_banner(Banner::error(err.to_string()));
        err
    }

    async fn report(&self, err: MonitorError) -> MonitorError {
        tracing::warn!(error = %err, "dashboard operation failed");
        self.state.write().await.set_banner(Banner::error(err.to_string()));
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use cropdash_domain::history::SensorHistory;
    use cropdash_domain::reading::SensorReading;
    use cropdash_domain::relay::RelayRecord;
    use cropdash_domain::status::SystemStatus;

    use crate::view::BannerKind;

    #[derive(Default)]
    struct StubBackend {
        calls: Mutex<Vec<String>>,
        relays: Vec<RelayRecord>,
        snapshot: Vec<SensorReading>,
        status: SystemStatus,
        fail_message: Option<String>,
    }

    impl StubBackend {
        fn record(&self, call: impl Into<String>) {
            self.calls.lock().unwrap().push(call.into());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn outcome(&self) -> Result<(), MonitorError> {
            match &self.fail_message {
                Some(message) => Err(MonitorError::Backend {
                    message: message.clone(),
                }),
                None => Ok(()),
            }
        }
    }

    impl MonitorBackend for StubBackend {
        async fn fetch_status(&self) -> Result<SystemStatus, MonitorError> {
            self.record("status");
            self.outcome()?;
            Ok(self.status.clone())
        }

        async fn fetch_relays(&self) -> Result<Vec<RelayRecord>, MonitorError> {
            self.record("relays");
            self.outcome()?;
            Ok(self.relays.clone())
        }

        async fn delete_relay(&self, relay_id: &str) -> Result<(), MonitorError> {
            self.record(format!("delete {relay_id}"));
            self.outcome()
        }

        async fn update_cycle(&self, relay_id: &str, delta_t: u32) -> Result<(), MonitorError> {
            self.record(format!("cycle {relay_id}={delta_t}"));
            self.outcome()
        }

        async fn start(
            &self,
            selected_relays: &[String],
            total_cycle: u32,
        ) -> Result<(), MonitorError> {
            self.record(format!("start {}:{total_cycle}", selected_relays.join(",")));
            self.outcome()
        }

        async fn stop(&self) -> Result<(), MonitorError> {
            self.record("stop");
            self.outcome()
        }

        async fn fetch_thresholds(&self) -> Result<ThresholdSet, MonitorError> {
            self.record("thresholds");
            self.outcome()?;
            Ok(ThresholdSet::default())
        }

        async fn save_thresholds(&self, set: &ThresholdSet) -> Result<ThresholdSet, MonitorError> {
            self.record("save_thresholds");
            self.outcome()?;
            Ok(*set)
        }

        async fn fetch_snapshot(&self) -> Result<Vec<SensorReading>, MonitorError> {
            self.record("data");
            self.outcome()?;
            Ok(self.snapshot.clone())
        }

        async fn fetch_history(
            &self,
            relay_id: &str,
            sensor_id: &str,
            time_range: TimeRange,
        ) -> Result<SensorHistory, MonitorError> {
            self.record(format!("history {relay_id}/{sensor_id}?{time_range}"));
            self.outcome()?;
            Ok(SensorHistory {
                relay_id: relay_id.to_string(),
                sensor_id: sensor_id.to_string(),
                is_relay: relay_id == sensor_id,
                managed_sensors: Vec::new(),
                history: Vec::new(),
            })
        }
    }

    fn relay(id: &str) -> RelayRecord {
        RelayRecord {
            relay_id: id.to_string(),
            sensor_ids: vec![],
            delta_t: 60,
        }
    }

    fn service(backend: StubBackend) -> DashboardService<StubBackend> {
        DashboardService::new(backend, Arc::new(RwLock::new(DashboardState::new())))
    }

    async fn select(svc: &DashboardService<StubBackend>, ids: &[&str]) {
        let mut state = svc.state().write().await;
        state.apply_relay_list(ids.iter().map(|id| relay(id)).collect());
        state.set_selection(ids.iter().map(ToString::to_string).collect());
    }

    async fn set_running(svc: &DashboardService<StubBackend>, running: bool) {
        let mut state = svc.state().write().await;
        let total_cycle = state.total_cycle();
        state.apply_run_state(running, total_cycle);
    }

    #[tokio::test]
    async fn should_reject_start_with_empty_selection_without_posting() {
        let svc = service(StubBackend::default());

        let result = svc.start(120).await;

        assert!(matches!(
            result,
            Err(MonitorError::Validation(ValidationError::EmptySelection))
        ));
        assert!(svc.backend.calls().is_empty());
        let banner = svc.state().write().await.take_banner().unwrap();
        assert_eq!(banner.kind, BannerKind::Error);
    }

    #[tokio::test]
    async fn should_reject_start_with_zero_total_cycle_without_posting() {
        let svc = service(StubBackend::default());
        select(&svc, &["R1"]).await;

        let result = svc.start(0).await;

        assert!(matches!(
            result,
            Err(MonitorError::Validation(ValidationError::TotalCycleTooShort))
        ));
        assert!(svc.backend.calls().is_empty());
    }

    #[tokio::test]
    async fn should_start_and_flip_run_state() {
        let svc = service(StubBackend::default());
        select(&svc, &["R1", "R2"]).await;

        svc.start(180).await.unwrap();

        assert_eq!(svc.backend.calls(), ["start R1,R2:180"]);
        let state = svc.state().read().await;
        assert!(state.running());
        assert_eq!(state.total_cycle(), 180);
    }

    #[tokio::test]
    async fn should_block_toggle_while_running_without_network_call() {
        let svc = service(StubBackend::default());
        select(&svc, &["R1"]).await;
        set_running(&svc, true).await;

        let result = svc.toggle_relay("R1").await;

        assert!(matches!(
            result,
            Err(MonitorError::Validation(ValidationError::SystemRunning))
        ));
        assert!(svc.backend.calls().is_empty());
        assert!(svc.state().read().await.is_selected("R1"));
        let banner = svc.state().write().await.take_banner().unwrap();
        assert_eq!(banner.kind, BannerKind::Error);
    }

    #[tokio::test]
    async fn should_toggle_selection_when_stopped() {
        let svc = service(StubBackend::default());
        select(&svc, &["R1"]).await;

        svc.toggle_relay("R1").await.unwrap();
        assert!(!svc.state().read().await.is_selected("R1"));

        svc.toggle_relay("R1").await.unwrap();
        assert!(svc.state().read().await.is_selected("R1"));
        assert!(svc.backend.calls().is_empty());
    }

    #[tokio::test]
    async fn should_require_confirmation_before_delete() {
        let svc = service(StubBackend::default());
        select(&svc, &["R1"]).await;

        let result = svc.delete_relay("R1", false).await;

        assert!(matches!(
            result,
            Err(MonitorError::Validation(ValidationError::ConfirmationRequired))
        ));
        assert!(svc.backend.calls().is_empty());
    }

    #[tokio::test]
    async fn should_delete_then_deselect_and_reload() {
        let svc = service(StubBackend {
            relays: vec![relay("R2")],
            ..StubBackend::default()
        });
        select(&svc, &["R1", "R2"]).await;

        svc.delete_relay("R1", true).await.unwrap();

        assert_eq!(svc.backend.calls(), ["delete R1", "relays"]);
        let state = svc.state().read().await;
        assert!(!state.is_selected("R1"));
        assert_eq!(state.relays().len(), 1);
    }

    #[tokio::test]
    async fn should_block_delete_while_running() {
        let svc = service(StubBackend::default());
        set_running(&svc, true).await;

        let result = svc.delete_relay("R1", true).await;

        assert!(matches!(
            result,
            Err(MonitorError::Validation(ValidationError::SystemRunning))
        ));
        assert!(svc.backend.calls().is_empty());
    }

    #[tokio::test]
    async fn should_reject_sub_second_delta_t_locally() {
        let svc = service(StubBackend::default());
        select(&svc, &["R1"]).await;

        let result = svc.update_delta("R1", 0).await;

        assert!(matches!(
            result,
            Err(MonitorError::Validation(ValidationError::CycleTooShort))
        ));
        assert!(svc.backend.calls().is_empty());
    }

    #[tokio::test]
    async fn should_update_delta_and_patch_cache() {
        let svc = service(StubBackend::default());
        select(&svc, &["R1"]).await;

        svc.update_delta("R1", 90).await.unwrap();

        assert_eq!(svc.backend.calls(), ["cycle R1=90"]);
        assert_eq!(svc.state().read().await.relays()[0].delta_t, 90);
    }

    #[tokio::test]
    async fn should_surface_backend_error_verbatim_in_banner() {
        let svc = service(StubBackend {
            fail_message: Some("relay registry locked".to_string()),
            ..StubBackend::default()
        });
        select(&svc, &["R1"]).await;

        let result = svc.start(120).await;

        assert!(matches!(result, Err(MonitorError::Backend { .. })));
        assert!(!svc.state().read().await.running());
        let banner = svc.state().write().await.take_banner().unwrap();
        assert_eq!(banner.message, "relay registry locked");
    }

    #[tokio::test]
    async fn should_stop_and_keep_total_cycle() {
        let svc = service(StubBackend::default());
        select(&svc, &["R1"]).await;
        svc.start(240).await.unwrap();

        svc.stop().await.unwrap();

        let state = svc.state().read().await;
        assert!(!state.running());
        assert_eq!(state.total_cycle(), 240);
    }

    #[tokio::test]
    async fn should_apply_thresholds_echoed_by_backend() {
        let svc = service(StubBackend::default());
        let set = ThresholdSet {
            temp_min: 10.0,
            ..ThresholdSet::default()
        };

        svc.save_thresholds(set).await.unwrap();

        assert_eq!(svc.state().read().await.thresholds().temp_min, 10.0);
        let banner = svc.state().write().await.take_banner().unwrap();
        assert_eq!(banner.kind, BannerKind::Success);
    }

    #[tokio::test]
    async fn should_load_status_into_store() {
        let svc = service(StubBackend {
            status: SystemStatus {
                running: true,
                selected_relays: vec!["R1".to_string()],
                total_cycle: 300,
            },
            ..StubBackend::default()
        });

        svc.load_status().await;

        let state = svc.state().read().await;
        assert!(state.running());
        assert_eq!(state.total_cycle(), 300);
        assert_eq!(state.selection(), ["R1".to_string()]);
    }

    #[tokio::test]
    async fn should_open_detail_with_requested_range() {
        let svc = service(StubBackend::default());

        svc.open_detail("R1", "S1", TimeRange::Hour).await.unwrap();

        assert_eq!(svc.backend.calls(), ["history R1/S1?hour"]);
        let state = svc.state().read().await;
        assert_eq!(state.active_view(), ActiveView::Detail);
        let detail = state.detail().unwrap();
        assert_eq!(detail.time_range, TimeRange::Hour);
        assert_eq!(detail.history.sensor_id, "S1");
    }

    #[tokio::test]
    async fn should_keep_view_when_detail_fetch_fails() {
        let svc = service(StubBackend {
            fail_message: Some("no such sensor".to_string()),
            ..StubBackend::default()
        });

        let result = svc.open_detail("R1", "S9", TimeRange::Day).await;

        assert!(result.is_err());
        assert_eq!(svc.state().read().await.active_view(), ActiveView::General);
    }
}
