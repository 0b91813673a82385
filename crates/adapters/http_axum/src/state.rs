//! Shared application state for axum handlers.

use std::sync::Arc;

use cropdash_app::polling::PollingController;
use cropdash_app::ports::MonitorBackend;
use cropdash_app::services::DashboardService;

/// Application state shared across all axum handlers.
///
/// Generic over the backend port to avoid dynamic dispatch. `Clone` is
/// implemented manually so the backend itself does not need to be `Clone`
/// — only the `Arc` wrappers are cloned.
pub struct AppState<B> {
    /// Dashboard use-case service.
    pub service: Arc<DashboardService<B>>,
    /// Auto-refresh timer for the general view.
    pub poller: Arc<PollingController>,
}

impl<B> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            poller: Arc::clone(&self.poller),
        }
    }
}

impl<B: MonitorBackend> AppState<B> {
    /// Create state from pre-wrapped `Arc`s (the service is shared with
    /// the polling task before the router exists).
    pub fn new(service: Arc<DashboardService<B>>, poller: Arc<PollingController>) -> Self {
        Self { service, poller }
    }
}
