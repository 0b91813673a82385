//! Dashboard handlers.
//!
//! Every GET runs its view load first, then drains the one-shot banner and
//! projects the page from a read lock. Every POST follows the
//! post/redirect/get pattern: the action's outcome (success or rejection)
//! is parked in the banner by the service, so the handler only has to
//! redirect back to the view that shows it.

use axum::Router;
use axum::extract::{Form, Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use serde::Deserialize;

use cropdash_app::ports::MonitorBackend;
use cropdash_domain::threshold::ThresholdSet;
use cropdash_domain::time_range::TimeRange;

use crate::state::AppState;
use crate::views::{self, DetailView, GeneralView, ManagerView};

/// Build the dashboard sub-router for SSR HTML pages.
pub fn routes<B>() -> Router<AppState<B>>
where
    B: MonitorBackend + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(index))
        .route("/general", get(general::<B>))
        .route("/manager", get(manager::<B>))
        .route("/detail/{relay_id}/{sensor_id}", get(detail::<B>))
        .route("/manager/start", post(start::<B>))
        .route("/manager/stop", post(stop::<B>))
        .route("/manager/thresholds", post(save_thresholds::<B>))
        .route("/manager/relays/{id}/toggle", post(toggle_relay::<B>))
        .route("/manager/relays/{id}/cycle", post(update_cycle::<B>))
        .route(
            "/manager/relays/{id}/delete",
            get(delete_relay_confirm::<B>).post(delete_relay::<B>),
        )
}

/// The landing page is the aggregate dashboard.
pub async fn index() -> Redirect {
    Redirect::to("/general")
}

pub async fn general<B: MonitorBackend>(State(state): State<AppState<B>>) -> Html<String> {
    // A failed refresh keeps the cached rows and parks the error in the
    // banner, so the page renders either way.
    let _ = state.service.show_general().await;
    let banner = state.service.state().write().await.take_banner();
    let view = GeneralView::project(&*state.service.state().read().await, banner);
    Html(views::general::render(&view))
}

pub async fn manager<B: MonitorBackend>(State(state): State<AppState<B>>) -> Html<String> {
    let _ = state.service.show_manager().await;
    let banner = state.service.state().write().await.take_banner();
    let view = ManagerView::project(&*state.service.state().read().await, banner);
    Html(views::manager::render(&view))
}

#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    time_range: Option<String>,
}

pub async fn detail<B: MonitorBackend>(
    State(state): State<AppState<B>>,
    Path((relay_id, sensor_id)): Path<(String, String)>,
    Query(query): Query<DetailQuery>,
) -> Response {
    let range = TimeRange::parse_or_default(query.time_range.as_deref().unwrap_or_default());
    if state
        .service
        .open_detail(&relay_id, &sensor_id, range)
        .await
        .is_err()
    {
        // Banner already explains the failure; fall back to the dashboard.
        return Redirect::to("/general").into_response();
    }
    let banner = state.service.state().write().await.take_banner();
    match DetailView::project(&*state.service.state().read().await, banner) {
        Some(view) => Html(views::detail::render(&view)).into_response(),
        None => Redirect::to("/general").into_response(),
    }
}

// --- manager actions ---------------------------------------------------

pub async fn toggle_relay<B: MonitorBackend>(
    State(state): State<AppState<B>>,
    Path(relay_id): Path<String>,
) -> Redirect {
    let _ = state.service.toggle_relay(&relay_id).await;
    Redirect::to("/manager")
}

pub async fn delete_relay_confirm<B: MonitorBackend>(
    State(_state): State<AppState<B>>,
    Path(relay_id): Path<String>,
) -> Html<String> {
    Html(views::manager::render_delete_confirm(&relay_id))
}

#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    #[serde(default)]
    confirmed: Option<String>,
}

pub async fn delete_relay<B: MonitorBackend>(
    State(state): State<AppState<B>>,
    Path(relay_id): Path<String>,
    Form(form): Form<DeleteForm>,
) -> Redirect {
    let confirmed = form.confirmed.as_deref() == Some("true");
    let _ = state.service.delete_relay(&relay_id, confirmed).await;
    Redirect::to("/manager")
}

#[derive(Debug, Deserialize)]
pub struct CycleForm {
    delta_t: String,
}

pub async fn update_cycle<B: MonitorBackend>(
    State(state): State<AppState<B>>,
    Path(relay_id): Path<String>,
    Form(form): Form<CycleForm>,
) -> Redirect {
    // Unparseable input falls through to the sub-second gate.
    let delta_t = form.delta_t.trim().parse().unwrap_or(0);
    let _ = state.service.update_delta(&relay_id, delta_t).await;
    Redirect::to("/manager")
}

#[derive(Debug, Deserialize)]
pub struct StartForm {
    total_cycle: String,
}

pub async fn start<B: MonitorBackend>(
    State(state): State<AppState<B>>,
    Form(form): Form<StartForm>,
) -> Redirect {
    let total_cycle = form.total_cycle.trim().parse().unwrap_or(0);
    let _ = state.service.start(total_cycle).await;
    Redirect::to("/manager")
}

pub async fn stop<B: MonitorBackend>(State(state): State<AppState<B>>) -> Redirect {
    let _ = state.service.stop().await;
    Redirect::to("/manager")
}

#[derive(Debug, Deserialize)]
pub struct ThresholdForm {
    temp_min: String,
    temp_max: String,
    humid_min: String,
    humid_max: String,
    soil_min: String,
    soil_max: String,
}

impl ThresholdForm {
    fn into_set(self) -> ThresholdSet {
        // Lenient numeric parsing: junk becomes NaN, which never trips a
        // bound comparison.
        let lenient = |raw: String| raw.trim().parse().unwrap_or(f64::NAN);
        ThresholdSet {
            temp_min: lenient(self.temp_min),
            temp_max: lenient(self.temp_max),
            humid_min: lenient(self.humid_min),
            humid_max: lenient(self.humid_max),
            soil_min: lenient(self.soil_min),
            soil_max: lenient(self.soil_max),
        }
    }
}

pub async fn save_thresholds<B: MonitorBackend>(
    State(state): State<AppState<B>>,
    Form(form): Form<ThresholdForm>,
) -> Redirect {
    let _ = state.service.save_thresholds(form.into_set()).await;
    Redirect::to("/manager")
}
