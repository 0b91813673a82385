//! Detail view — one sensor's history with threshold-annotated charts.

use std::fmt::Write as _;

use cropdash_domain::classification::{Dimension, Severity};
use cropdash_domain::time_range::TimeRange;

use super::layout::{self, NavTab};
use super::{DetailView, charts, escape};

/// Render the full detail page.
#[must_use]
pub fn render(view: &DetailView) -> String {
    let history = &view.history;
    let title = if history.is_relay {
        format!("Relay {} detail", history.relay_id)
    } else {
        format!("Sensor {} detail", history.sensor_id)
    };

    let mut body = format!("<p><a href=\"/general\">&larr; Back to dashboard</a></p>{}", info_cards(view));
    body.push_str(&range_menu(view));
    body.push_str(&chart_panels(view));

    layout::page(&title, NavTab::Detail, view.banner.as_ref(), &body)
}

fn info_cards(view: &DetailView) -> String {
    let history = &view.history;
    let mut html = format!(
        "<div class=\"info-cards\"><div class=\"info-card\"><h3>ID</h3><p>{}</p></div>",
        escape(&history.sensor_id)
    );

    if history.is_relay {
        let sensors = if history.managed_sensors.is_empty() {
            "no sensors".to_string()
        } else {
            escape(&history.managed_sensors.join(", "))
        };
        let _ = write!(
            html,
            "<div class=\"info-card\"><h3>Managed sensors</h3><p>{sensors}</p></div>"
        );
    } else {
        let _ = write!(
            html,
            "<div class=\"info-card\"><h3>Managing relay</h3><p>{}</p></div>",
            escape(&history.relay_id)
        );
    }

    if let Some(status) = &view.latest_status {
        let class = match status.severity {
            Severity::Normal => "status-normal",
            Severity::Warning => "status-warning",
            Severity::Danger => "status-danger",
        };
        let last_seen = history
            .latest()
            .and_then(|r| r.timestamp.as_deref())
            .unwrap_or("N/A");
        let _ = write!(
            html,
            "<div class=\"info-card\"><h3>Status</h3><p class=\"{class}\">{}</p></div>\
             <div class=\"info-card\"><h3>Last sample</h3><p>{}</p></div>",
            escape(&status.message()),
            escape(last_seen),
        );
    }

    html.push_str("</div>");
    html
}

fn range_menu(view: &DetailView) -> String {
    let history = &view.history;
    let mut html = String::from("<p>Range: ");
    for range in TimeRange::ALL {
        if range == view.time_range {
            let _ = write!(html, "<strong>{}</strong> ", range.label());
        } else {
            let _ = write!(
                html,
                "<a href=\"/detail/{}/{}?time_range={}\">{}</a> ",
                escape(&history.relay_id),
                escape(&history.sensor_id),
                range.as_query(),
                range.label(),
            );
        }
    }
    html.push_str("</p>");
    html
}

fn chart_panels(view: &DetailView) -> String {
    // History arrives newest first; charts run chronologically.
    let series = |pick: fn(&cropdash_domain::reading::SensorReading) -> f64| {
        let mut values: Vec<f64> = view.history.history.iter().map(pick).collect();
        values.reverse();
        values
    };

    let mut html = String::new();
    let titles = ["Temperature (\u{b0}C)", "Humidity (%)", "Soil moisture (%)"];
    let all_series = [
        series(|r| r.temp),
        series(|r| r.humid),
        series(|r| r.soil),
    ];
    for ((dimension, title), values) in Dimension::ALL.into_iter().zip(titles).zip(all_series) {
        let (min, max) = view.thresholds.bounds(dimension);
        html.push_str(&charts::line_panel(title, &values, min, max));
    }
    html
}
