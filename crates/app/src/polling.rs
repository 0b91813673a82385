//! Polling controller — keeps the visible view fresh without user action.
//!
//! A single repeating timer fires at a fixed period regardless of whether
//! the monitored system is running. A tick only fetches when the general
//! view is the visible one; on any other view it is a no-op, which avoids
//! wasted requests and keeps manager-view edits undisturbed. There is no
//! overlap control: a slow fetch from tick N may land after tick N+1's,
//! last writer wins on the reading cache.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::ports::MonitorBackend;
use crate::services::DashboardService;
use crate::view::ActiveView;

/// Owns the refresh timer. Exactly one timer task is live at any time;
/// re-initializing tears the old one down before arming the next.
pub struct PollingController {
    period: Duration,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl PollingController {
    /// Create a controller with the given tick period (the dashboard
    /// default is 5 seconds).
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            task: Mutex::new(None),
        }
    }

    /// Tear down any existing timer and arm a fresh one.
    pub fn restart<B>(&self, service: Arc<DashboardService<B>>)
    where
        B: MonitorBackend + Send + Sync + 'static,
    {
        let period = self.period;
        let mut slot = self.task.lock().expect("poller mutex poisoned");
        if let Some(handle) = slot.take() {
            handle.abort();
        }
        *slot = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // The first tick of an interval completes immediately; consume
            // it so refreshes start one full period after arming.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let general_visible =
                    service.state().read().await.active_view() == ActiveView::General;
                if general_visible {
                    if let Err(err) = service.refresh_general().await {
                        tracing::debug!(error = %err, "auto refresh failed");
                    }
                }
            }
        }));
    }

    /// Tear down the timer, if armed.
    pub fn stop(&self) {
        if let Some(handle) = self.task.lock().expect("poller mutex poisoned").take() {
            handle.abort();
        }
    }

    /// Whether a timer task is currently armed.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.task
            .lock()
            .expect("poller mutex poisoned")
            .is_some()
    }
}

impl Drop for PollingController {
    fn drop(&mut self) {
        self.stop();
    }
}
