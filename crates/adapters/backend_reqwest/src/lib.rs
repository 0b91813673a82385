//! # cropdash-adapter-backend-reqwest
//!
//! HTTP client adapter — implements the `MonitorBackend` port against the
//! monitor's REST API using `reqwest`.
//!
//! ## Behavior
//! - JSON request/response bodies; every reply is checked for the
//!   `success: bool` convention (see [`wire`])
//! - Transport failures map to `MonitorError::Transport`, `success: false`
//!   to `MonitorError::Backend`
//! - No retries and no request timeouts: a hung request never resolves and
//!   the corresponding user action simply never completes
//!
//! ## Dependency rule
//! Depends on `cropdash-app` (port trait) and `cropdash-domain` only.

pub mod wire;

use serde::Serialize;
use serde::de::DeserializeOwned;

use cropdash_app::ports::MonitorBackend;
use cropdash_domain::error::MonitorError;
use cropdash_domain::history::SensorHistory;
use cropdash_domain::reading::SensorReading;
use cropdash_domain::relay::RelayRecord;
use cropdash_domain::status::SystemStatus;
use cropdash_domain::threshold::ThresholdSet;
use cropdash_domain::time_range::TimeRange;

/// `MonitorBackend` implementation over HTTP.
pub struct HttpMonitorBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMonitorBackend {
    /// Create a client for the given base URL (scheme + host + port, no
    /// trailing slash).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            // No request timeout; a slow fetch races last-writer-wins
            // with later refreshes instead of erroring out.
            client: reqwest::Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, MonitorError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(MonitorError::transport)?;
        response.json().await.map_err(MonitorError::transport)
    }

    async fn post_json<T: DeserializeOwned, P: Serialize + Sync>(
        &self,
        path: &str,
        payload: &P,
    ) -> Result<T, MonitorError> {
        let response = self
            .client
            .post(self.url(path))
            .json(payload)
            .send()
            .await
            .map_err(MonitorError::transport)?;
        response.json().await.map_err(MonitorError::transport)
    }
}

#[derive(Serialize)]
struct UpdateCycleRequest<'a> {
    relay_id: &'a str,
    delta_t: u32,
}

#[derive(Serialize)]
struct StartRequest<'a> {
    selected_relays: &'a [String],
    total_cycle: u32,
}

impl MonitorBackend for HttpMonitorBackend {
    async fn fetch_status(&self) -> Result<SystemStatus, MonitorError> {
        self.get_json::<wire::StatusReply>("/api/status")
            .await?
            .into_domain()
    }

    async fn fetch_relays(&self) -> Result<Vec<RelayRecord>, MonitorError> {
        self.get_json::<wire::RelaysReply>("/api/relays")
            .await?
            .into_domain()
    }

    async fn delete_relay(&self, relay_id: &str) -> Result<(), MonitorError> {
        let response = self
            .client
            .delete(self.url(&format!("/api/relay/{relay_id}")))
            .send()
            .await
            .map_err(MonitorError::transport)?;
        response
            .json::<wire::AckReply>()
            .await
            .map_err(MonitorError::transport)?
            .into_domain()
    }

    async fn update_cycle(&self, relay_id: &str, delta_t: u32) -> Result<(), MonitorError> {
        self.post_json::<wire::AckReply, _>(
            "/api/update_cycle",
            &UpdateCycleRequest { relay_id, delta_t },
        )
        .await?
        .into_domain()
    }

    async fn start(&self, selected_relays: &[String], total_cycle: u32) -> Result<(), MonitorError> {
        self.post_json::<wire::AckReply, _>(
            "/api/start",
            &StartRequest {
                selected_relays,
                total_cycle,
            },
        )
        .await?
        .into_domain()
    }

    async fn stop(&self) -> Result<(), MonitorError> {
        self.post_json::<wire::AckReply, _>("/api/stop", &serde_json::json!({}))
            .await?
            .into_domain()
    }

    async fn fetch_thresholds(&self) -> Result<ThresholdSet, MonitorError> {
        self.get_json::<wire::ThresholdsReply>("/api/thresholds")
            .await?
            .into_domain()
    }

    async fn save_thresholds(&self, set: &ThresholdSet) -> Result<ThresholdSet, MonitorError> {
        self.post_json::<wire::ThresholdsReply, _>("/api/thresholds", set)
            .await?
            .into_domain()
    }

    async fn fetch_snapshot(&self) -> Result<Vec<SensorReading>, MonitorError> {
        self.get_json::<wire::SnapshotReply>("/api/data")
            .await?
            .into_domain()
    }

    async fn fetch_history(
        &self,
        relay_id: &str,
        sensor_id: &str,
        time_range: TimeRange,
    ) -> Result<SensorHistory, MonitorError> {
        let path = format!(
            "/api/sensor/{relay_id}/{sensor_id}?time_range={}",
            time_range.as_query()
        );
        self.get_json::<wire::HistoryReply>(&path)
            .await?
            .into_domain()
    }
}
