//! History time ranges — the fixed set accepted by the backend.

use serde::{Deserialize, Serialize};

/// Selectable window for sensor history queries.
///
/// Wire names match the backend's `time_range` query parameter. Unknown
/// values fall back to [`TimeRange::Day`] (the backend treats unrecognized
/// ranges as no filter, but the dashboard only ever offers this set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeRange {
    /// The 20 most recent samples.
    #[serde(rename = "default")]
    Latest,
    #[serde(rename = "minute")]
    Minute,
    #[serde(rename = "hour")]
    Hour,
    /// Last 24 hours — the dashboard default.
    #[default]
    #[serde(rename = "24hour")]
    Day,
    #[serde(rename = "month")]
    Month,
    #[serde(rename = "all")]
    All,
}

impl TimeRange {
    /// All ranges in menu order.
    pub const ALL: [Self; 6] = [
        Self::Latest,
        Self::Minute,
        Self::Hour,
        Self::Day,
        Self::Month,
        Self::All,
    ];

    /// The value sent as the `time_range` query parameter.
    #[must_use]
    pub fn as_query(self) -> &'static str {
        match self {
            Self::Latest => "default",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "24hour",
            Self::Month => "month",
            Self::All => "all",
        }
    }

    /// Menu label shown in the detail view.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Latest => "latest 20",
            Self::Minute => "last minute",
            Self::Hour => "last hour",
            Self::Day => "last 24 hours",
            Self::Month => "last month",
            Self::All => "all",
        }
    }

    /// Parse a query value, falling back to the default for unknown input.
    #[must_use]
    pub fn parse_or_default(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|range| range.as_query() == value)
            .unwrap_or_default()
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_query())
    }
}
