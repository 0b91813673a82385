//! View bookkeeping — which of the three views is visible.

use cropdash_domain::history::SensorHistory;
use cropdash_domain::time_range::TimeRange;

/// The three mutually exclusive dashboard views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    /// Relay manager — selection, Δt editing, start/stop, thresholds.
    Manager,
    /// Aggregate reading table for the selected relays.
    #[default]
    General,
    /// Per-sensor history with charts.
    Detail,
}

/// Backing data for the detail view.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailContext {
    pub history: SensorHistory,
    pub time_range: TimeRange,
}

/// A transient, dismissible notification shown above the active view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

impl Banner {
    /// Error banner.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            message: message.into(),
        }
    }

    /// Success banner.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Success,
            message: message.into(),
        }
    }
}

/// Visual flavor of a [`Banner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}
