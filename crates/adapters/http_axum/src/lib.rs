//! # cropdash-adapter-http-axum
//!
//! HTTP adapter using axum — serves the dashboard as server-rendered HTML
//! (no JavaScript) and translates form posts into service calls.
//!
//! ## Responsibilities
//! - Route the three views (`/manager`, `/general`, `/detail/...`) and
//!   their actions (toggle, delete, cycle, start/stop, thresholds)
//! - Project store state into typed view-models and render them through
//!   the pure functions in [`views`]
//! - Follow the POST/redirect/GET pattern for every mutation; failures of
//!   any class surface as the one-shot banner on the next page
//!
//! ## Dependency rule
//! Depends on `cropdash-app` (service + store) and `cropdash-domain` only.

pub mod dashboard;
pub mod router;
pub mod state;
pub mod views;
