//! General view — aggregate reading table for the selected relays.

use std::fmt::Write as _;

use cropdash_domain::classification::Severity;

use super::layout::{self, NavTab};
use super::{GeneralRow, GeneralView, escape, measurement};

/// Render the full general page.
#[must_use]
pub fn render(view: &GeneralView) -> String {
    let body = if !view.have_any_readings {
        "<div class=\"loading\">No data yet. Waiting for the gateway to report.</div>".to_string()
    } else if view.rows.is_empty() {
        "<div class=\"loading\">No data from the selected relays. \
         Pick relays on the manager page.</div>"
            .to_string()
    } else {
        render_table(&view.rows)
    };
    layout::page("Dashboard", NavTab::General, view.banner.as_ref(), &body)
}

fn render_table(rows: &[GeneralRow]) -> String {
    let mut html = String::from(
        "<table class=\"data\"><thead><tr>\
         <th>Relay</th><th>Sensor</th><th>Temperature (\u{b0}C)</th>\
         <th>Humidity (%)</th><th>Soil moisture (%)</th>\
         <th>Time</th><th>Status</th></tr></thead><tbody>",
    );
    for row in rows {
        html.push_str(&render_row(row));
    }
    html.push_str("</tbody></table>");
    html
}

fn render_row(row: &GeneralRow) -> String {
    let reading = &row.reading;
    let row_class = if reading.is_relay_sensor() {
        " class=\"relay-row\""
    } else {
        ""
    };
    let status_class = match row.status.severity {
        Severity::Normal => "status-normal",
        Severity::Warning => "status-warning",
        Severity::Danger => "status-danger",
    };
    let mut html = format!("<tr{row_class}><td>{}</td>", escape(&reading.relay_id));
    let _ = write!(
        html,
        "<td><a href=\"/detail/{relay}/{sensor}\">{sensor}</a></td>\
         <td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
         <td class=\"{status_class}\">{}</td></tr>",
        measurement(reading.temp),
        measurement(reading.humid),
        measurement(reading.soil),
        escape(reading.timestamp.as_deref().unwrap_or("N/A")),
        escape(&row.status.message()),
        relay = escape(&reading.relay_id),
        sensor = escape(&reading.sensor_id),
    );
    html
}
