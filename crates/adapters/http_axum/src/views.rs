//! Typed view-models and pure render functions.
//!
//! Each view is projected from the store into a plain struct, then turned
//! into HTML by a pure function — nothing here touches the store, the
//! network, or axum, which keeps the rendering fully unit-testable.

pub mod charts;
pub mod detail;
pub mod general;
pub mod layout;
pub mod manager;

use cropdash_app::state::DashboardState;
use cropdash_app::view::Banner;
use cropdash_domain::classification::{StatusClassification, classify};
use cropdash_domain::history::SensorHistory;
use cropdash_domain::reading::SensorReading;
use cropdash_domain::relay::RelayRecord;
use cropdash_domain::threshold::ThresholdSet;
use cropdash_domain::time_range::TimeRange;

/// Escape text for safe interpolation into HTML.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Format a measurement to one decimal; `NaN` renders as `--`.
#[must_use]
pub fn measurement(value: f64) -> String {
    if value.is_nan() {
        "--".to_string()
    } else {
        format!("{value:.1}")
    }
}

/// One relay card on the manager view.
#[derive(Debug, Clone)]
pub struct RelayCard {
    pub record: RelayRecord,
    pub selected: bool,
}

/// Backing model for the manager view.
#[derive(Debug, Clone)]
pub struct ManagerView {
    pub running: bool,
    pub total_cycle: u32,
    pub relays: Vec<RelayCard>,
    pub thresholds: ThresholdSet,
    pub banner: Option<Banner>,
}

impl ManagerView {
    /// Project the manager view from the store.
    #[must_use]
    pub fn project(state: &DashboardState, banner: Option<Banner>) -> Self {
        Self {
            running: state.running(),
            total_cycle: state.total_cycle(),
            relays: state
                .relays()
                .iter()
                .map(|record| RelayCard {
                    record: record.clone(),
                    selected: state.is_selected(&record.relay_id),
                })
                .collect(),
            thresholds: *state.thresholds(),
            banner,
        }
    }
}

/// One row of the aggregate table.
#[derive(Debug, Clone)]
pub struct GeneralRow {
    pub reading: SensorReading,
    pub status: StatusClassification,
}

/// Backing model for the general view.
#[derive(Debug, Clone)]
pub struct GeneralView {
    /// Rows for the currently selected relays only.
    pub rows: Vec<GeneralRow>,
    /// Whether the backend has reported any readings at all (drives the
    /// "no data yet" vs "nothing selected" empty states).
    pub have_any_readings: bool,
    pub banner: Option<Banner>,
}

impl GeneralView {
    /// Project the general view: readings filtered to the selection, each
    /// classified against the active thresholds.
    #[must_use]
    pub fn project(state: &DashboardState, banner: Option<Banner>) -> Self {
        let thresholds = state.thresholds();
        let rows = state
            .readings()
            .iter()
            .filter(|reading| state.is_selected(&reading.relay_id))
            .map(|reading| GeneralRow {
                status: classify(reading, thresholds),
                reading: reading.clone(),
            })
            .collect();
        Self {
            rows,
            have_any_readings: !state.readings().is_empty(),
            banner,
        }
    }
}

/// Backing model for the detail view.
#[derive(Debug, Clone)]
pub struct DetailView {
    pub history: SensorHistory,
    pub time_range: TimeRange,
    pub thresholds: ThresholdSet,
    /// Classification of the newest sample, if any.
    pub latest_status: Option<StatusClassification>,
    pub banner: Option<Banner>,
}

impl DetailView {
    /// Project the detail view; `None` when no detail context is loaded.
    #[must_use]
    pub fn project(state: &DashboardState, banner: Option<Banner>) -> Option<Self> {
        let context = state.detail()?;
        let latest_status = context
            .history
            .latest()
            .map(|reading| classify(reading, state.thresholds()));
        Some(Self {
            history: context.history.clone(),
            time_range: context.time_range,
            thresholds: *state.thresholds(),
            latest_status,
            banner,
        })
    }
}
