//! # cropdash-domain
//!
//! Domain model for cropdash — the pure types shared by every layer.
//!
//! ## Responsibilities
//! - Value objects mirroring the monitor backend's records:
//!   [`RelayRecord`](relay::RelayRecord), [`SensorReading`](reading::SensorReading),
//!   [`ThresholdSet`](threshold::ThresholdSet), [`SystemStatus`](status::SystemStatus)
//! - The alert classifier ([`classification::classify`]) used by both the
//!   aggregate table and the detail view for color-coding
//! - The [`MonitorError`](error::MonitorError) taxonomy shared across layers
//!
//! ## Dependency rule
//! No IO, no frameworks. Depends on `serde`/`thiserror` only.

pub mod classification;
pub mod error;
pub mod history;
pub mod reading;
pub mod relay;
pub mod status;
pub mod threshold;
pub mod time_range;
