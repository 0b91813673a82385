//! View-state store — the single owned mirror of server state.
//!
//! Every field is mutated through a named method so the write sites stay
//! auditable. The store performs no validation beyond the selection
//! reconciliation rule; editing gates live in the service layer.

use cropdash_domain::reading::SensorReading;
use cropdash_domain::relay::RelayRecord;
use cropdash_domain::threshold::ThresholdSet;

use crate::view::{ActiveView, Banner, DetailContext};

/// All dashboard state, shared behind `Arc<RwLock<_>>` by handlers and the
/// polling task.
///
/// Handlers hold the lock only for synchronous sections, so each mutation
/// is atomic with respect to other handlers while cross-step sequences
/// (fetch, then apply) may interleave — displayed data is advisory and
/// self-heals on the next refresh.
#[derive(Debug, Default)]
pub struct DashboardState {
    relays: Vec<RelayRecord>,
    selection: Vec<String>,
    thresholds: ThresholdSet,
    running: bool,
    total_cycle: u32,
    readings: Vec<SensorReading>,
    active_view: ActiveView,
    detail: Option<DetailContext>,
    banner: Option<Banner>,
}

impl DashboardState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            total_cycle: 120,
            ..Self::default()
        }
    }

    // --- reads ---------------------------------------------------------

    #[must_use]
    pub fn relays(&self) -> &[RelayRecord] {
        &self.relays
    }

    #[must_use]
    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    #[must_use]
    pub fn is_selected(&self, relay_id: &str) -> bool {
        self.selection.iter().any(|id| id == relay_id)
    }

    #[must_use]
    pub fn thresholds(&self) -> &ThresholdSet {
        &self.thresholds
    }

    #[must_use]
    pub fn running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn total_cycle(&self) -> u32 {
        self.total_cycle
    }

    #[must_use]
    pub fn readings(&self) -> &[SensorReading] {
        &self.readings
    }

    #[must_use]
    pub fn active_view(&self) -> ActiveView {
        self.active_view
    }

    #[must_use]
    pub fn detail(&self) -> Option<&DetailContext> {
        self.detail.as_ref()
    }

    // --- mutation points -----------------------------------------------

    /// Replace the selection wholesale, keeping the first occurrence of
    /// each id. Callers reload-side must only pass ids present in the
    /// current relay cache; [`Self::apply_relay_list`] re-establishes that
    /// invariant after every reload.
    pub fn set_selection(&mut self, ids: Vec<String>) {
        self.selection.clear();
        for id in ids {
            if !self.selection.contains(&id) {
                self.selection.push(id);
            }
        }
    }

    /// Add or remove one relay from the selection.
    pub fn toggle_selection(&mut self, relay_id: &str) {
        if let Some(pos) = self.selection.iter().position(|id| id == relay_id) {
            self.selection.remove(pos);
        } else {
            self.selection.push(relay_id.to_string());
        }
    }

    /// Remove one relay from the selection if present.
    pub fn deselect(&mut self, relay_id: &str) {
        self.selection.retain(|id| id != relay_id);
    }

    /// Replace the relay cache, then drop selected ids that no longer
    /// exist (stale ids survive backend migrations otherwise).
    pub fn apply_relay_list(&mut self, records: Vec<RelayRecord>) {
        self.relays = records;
        self.selection
            .retain(|id| self.relays.iter().any(|r| &r.relay_id == id));
    }

    /// Patch one cached relay's Δt after a successful cycle update.
    pub fn patch_delta_t(&mut self, relay_id: &str, delta_t: u32) {
        if let Some(record) = self.relays.iter_mut().find(|r| r.relay_id == relay_id) {
            record.delta_t = delta_t;
        }
    }

    /// Replace the threshold set wholesale; partial updates are not
    /// supported anywhere in the system.
    pub fn apply_thresholds(&mut self, set: ThresholdSet) {
        self.thresholds = set;
    }

    /// Update the run state. This is the single switch gating relay edits.
    pub fn apply_run_state(&mut self, running: bool, total_cycle: u32) {
        self.running = running;
        self.total_cycle = total_cycle;
    }

    /// Replace the reading cache (last writer wins).
    pub fn apply_sensor_data(&mut self, readings: Vec<SensorReading>) {
        self.readings = readings;
    }

    /// Switch the visible view; leaving the detail view drops its context.
    pub fn set_active_view(&mut self, view: ActiveView) {
        self.active_view = view;
        if view != ActiveView::Detail {
            self.detail = None;
        }
    }

    /// Enter the detail view for one sensor.
    pub fn set_detail(&mut self, context: DetailContext) {
        self.detail = Some(context);
        self.active_view = ActiveView::Detail;
    }

    /// Park a banner for the next render.
    pub fn set_banner(&mut self, banner: Banner) {
        self.banner = Some(banner);
    }

    /// Take the pending banner, clearing it (one-shot, like a flash
    /// message).
    pub fn take_banner(&mut self) -> Option<Banner> {
        self.banner.take()
    }
}
