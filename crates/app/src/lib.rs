//! # cropdash-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the outbound **port trait** the backend adapter implements:
//!   `MonitorBackend` — the monitor's HTTP API surface
//! - Hold the **view-state store** ([`state::DashboardState`]) with its
//!   explicit mutation points and selection reconciliation
//! - Orchestrate user actions through [`services::DashboardService`],
//!   enforcing the local editing gates before any network call
//! - Keep the visible view fresh via [`polling::PollingController`]
//!
//! ## Dependency rule
//! Depends on `cropdash-domain` only (plus `tokio::sync`/`tokio::time`).
//! Never imports adapter crates. Adapters depend on *this* crate.

pub mod polling;
pub mod ports;
pub mod services;
pub mod state;
pub mod view;
