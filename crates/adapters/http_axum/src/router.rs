//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use cropdash_app::ports::MonitorBackend;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Mounts the dashboard pages at `/` next to a `/health` probe. Includes a
/// [`TraceLayer`] that logs each HTTP request/response at the `DEBUG` level
/// using the `tracing` ecosystem.
pub fn build<B>(state: AppState<B>) -> Router
where
    B: MonitorBackend + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .merge(crate::dashboard::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use tokio::sync::RwLock;
    use tower::ServiceExt;

    use cropdash_app::polling::PollingController;
    use cropdash_app::services::DashboardService;
    use cropdash_app::state::DashboardState;
    use cropdash_domain::error::MonitorError;
    use cropdash_domain::history::SensorHistory;
    use cropdash_domain::reading::SensorReading;
    use cropdash_domain::relay::RelayRecord;
    use cropdash_domain::status::SystemStatus;
    use cropdash_domain::threshold::ThresholdSet;
    use cropdash_domain::time_range::TimeRange;

    struct StubBackend;

    impl MonitorBackend for StubBackend {
        async fn fetch_status(&self) -> Result<SystemStatus, MonitorError> {
            Ok(SystemStatus {
                running: false,
                selected_relays: vec!["R1".to_string()],
                total_cycle: 120,
            })
        }
        async fn fetch_relays(&self) -> Result<Vec<RelayRecord>, MonitorError> {
            Ok(vec![RelayRecord {
                relay_id: "R1".to_string(),
                sensor_ids: vec!["S1".to_string()],
                delta_t: 60,
            }])
        }
        async fn delete_relay(&self, _relay_id: &str) -> Result<(), MonitorError> {
            Ok(())
        }
        async fn update_cycle(&self, _relay_id: &str, _delta_t: u32) -> Result<(), MonitorError> {
            Ok(())
        }
        async fn start(
            &self,
            _selected_relays: &[String],
            _total_cycle: u32,
        ) -> Result<(), MonitorError> {
            Ok(())
        }
        async fn stop(&self) -> Result<(), MonitorError> {
            Ok(())
        }
        async fn fetch_thresholds(&self) -> Result<ThresholdSet, MonitorError> {
            Ok(ThresholdSet::default())
        }
        async fn save_thresholds(&self, set: &ThresholdSet) -> Result<ThresholdSet, MonitorError> {
            Ok(*set)
        }
        async fn fetch_snapshot(&self) -> Result<Vec<SensorReading>, MonitorError> {
            serde_json::from_str(
                r#"[{"relay_id":"R1","sensor_id":"S1","temp":25,"humid":60,"soil":40,"timestamp":"t1"}]"#,
            )
            .map_err(MonitorError::transport)
        }
        async fn fetch_history(
            &self,
            relay_id: &str,
            sensor_id: &str,
            _time_range: TimeRange,
        ) -> Result<SensorHistory, MonitorError> {
            Ok(SensorHistory {
                relay_id: relay_id.to_string(),
                sensor_id: sensor_id.to_string(),
                is_relay: false,
                managed_sensors: Vec::new(),
                history: Vec::new(),
            })
        }
    }

    async fn test_app() -> Router {
        let service = Arc::new(DashboardService::new(
            StubBackend,
            Arc::new(RwLock::new(DashboardState::new())),
        ));
        service.load_status().await;
        service.load_relays().await.unwrap();
        let poller = Arc::new(PollingController::new(std::time::Duration::from_secs(5)));
        build(AppState::new(service, poller))
    }

    async fn get_page(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    async fn post_form(app: Router, uri: &str, body: &'static str) -> (StatusCode, Option<String>) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        (response.status(), location)
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let (status, body) = get_page(test_app().await, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }

    #[tokio::test]
    async fn should_redirect_root_to_general() {
        let app = test_app().await;
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/general");
    }

    #[tokio::test]
    async fn should_render_general_table_for_selected_relays() {
        let (status, body) = get_page(test_app().await, "/general").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<table class=\"data\""));
        assert!(body.contains("href=\"/detail/R1/S1\""));
    }

    #[tokio::test]
    async fn should_render_manager_with_relay_cards() {
        let (status, body) = get_page(test_app().await, "/manager").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Relay R1"));
        assert!(body.contains("START system"));
    }

    #[tokio::test]
    async fn should_render_detail_with_requested_range() {
        let (status, body) = get_page(test_app().await, "/detail/R1/S1?time_range=hour").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<strong>last hour</strong>"));
    }

    #[tokio::test]
    async fn should_fall_back_to_default_range_on_unknown_query() {
        let (status, body) = get_page(test_app().await, "/detail/R1/S1?time_range=bogus").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<strong>last 24 hours</strong>"));
    }

    #[tokio::test]
    async fn should_redirect_after_start_post() {
        let (status, location) =
            post_form(test_app().await, "/manager/start", "total_cycle=180").await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location.as_deref(), Some("/manager"));
    }

    #[tokio::test]
    async fn should_flash_rejection_banner_after_invalid_start() {
        let service = Arc::new(DashboardService::new(
            StubBackend,
            Arc::new(RwLock::new(DashboardState::new())),
        ));
        let poller = Arc::new(PollingController::new(std::time::Duration::from_secs(5)));
        let state = AppState::new(Arc::clone(&service), poller);

        // Empty selection: the gate trips before any POST reaches the
        // backend and the rejection lands in the banner.
        let (status, _) = post_form(
            build(state.clone()),
            "/manager/start",
            "total_cycle=120",
        )
        .await;
        assert_eq!(status, StatusCode::SEE_OTHER);

        let (_, body) = get_page(build(state.clone()), "/manager").await;
        assert!(body.contains("banner-error"));
        assert!(body.contains("select at least one relay"));

        // The banner is one-shot: the next render is clean.
        let (_, body) = get_page(build(state), "/manager").await;
        assert!(!body.contains("banner-error"));
    }

    #[tokio::test]
    async fn should_serve_delete_confirmation_page() {
        let (status, body) = get_page(test_app().await, "/manager/relays/R1/delete").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Delete relay R1?"));
        assert!(body.contains("name=\"confirmed\" value=\"true\""));
    }

    #[tokio::test]
    async fn should_redirect_after_confirmed_delete() {
        let (status, location) = post_form(
            test_app().await,
            "/manager/relays/R1/delete",
            "confirmed=true",
        )
        .await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location.as_deref(), Some("/manager"));
    }

    #[tokio::test]
    async fn should_redirect_after_toggle_and_cycle_posts() {
        let (status, _) = post_form(test_app().await, "/manager/relays/R1/toggle", "").await;
        assert_eq!(status, StatusCode::SEE_OTHER);

        let (status, _) =
            post_form(test_app().await, "/manager/relays/R1/cycle", "delta_t=90").await;
        assert_eq!(status, StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn should_redirect_after_threshold_save() {
        let (status, location) = post_form(
            test_app().await,
            "/manager/thresholds",
            "temp_min=18&temp_max=32&humid_min=40&humid_max=80&soil_min=20&soil_max=70",
        )
        .await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location.as_deref(), Some("/manager"));
    }
}
