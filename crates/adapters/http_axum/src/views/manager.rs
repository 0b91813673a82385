//! Manager view — relay selection, Δt editing, start/stop, thresholds.

use std::fmt::Write as _;

use super::layout::{self, NavTab};
use super::{ManagerView, RelayCard, escape};

/// Render the full manager page.
#[must_use]
pub fn render(view: &ManagerView) -> String {
    let mut body = String::new();
    body.push_str(&render_run_controls(view));

    if view.relays.is_empty() {
        body.push_str(
            "<div class=\"loading\">No relays registered yet. \
             Waiting for the gateway's advertise messages.</div>",
        );
    } else {
        body.push_str("<div class=\"relay-grid\">");
        for card in &view.relays {
            body.push_str(&render_relay_card(card, view.running));
        }
        body.push_str("</div>");
    }

    body.push_str(&render_threshold_form(view));
    layout::page("Relay manager", NavTab::Manager, view.banner.as_ref(), &body)
}

/// Render the delete confirmation page for one relay.
#[must_use]
pub fn render_delete_confirm(relay_id: &str) -> String {
    let id = escape(relay_id);
    let body = format!(
        "<h2>Delete relay {id}?</h2>\
         <p>The relay is removed from the registry entirely and can only \
         re-register from a new advertise message.</p>\
         <form method=\"post\" action=\"/manager/relays/{id}/delete\">\
         <input type=\"hidden\" name=\"confirmed\" value=\"true\">\
         <button type=\"submit\">Delete</button> \
         <a href=\"/manager\">Cancel</a></form>"
    );
    layout::page("Confirm deletion", NavTab::Manager, None, &body)
}

fn disabled(running: bool) -> &'static str {
    if running { " disabled" } else { "" }
}

fn render_run_controls(view: &ManagerView) -> String {
    let gate = disabled(view.running);
    let (action, label) = if view.running {
        ("/manager/stop", "STOP system")
    } else {
        ("/manager/start", "START system")
    };
    let refresh = if view.running {
        "<span class=\"loading\">refresh paused while running</span>".to_string()
    } else {
        "<a href=\"/manager\">Refresh relay list</a>".to_string()
    };
    format!(
        "<form method=\"post\" action=\"{action}\">\
         <label>Total cycle T (s): \
         <input type=\"number\" name=\"total_cycle\" value=\"{}\" min=\"1\"{gate}></label> \
         <button type=\"submit\">{label}</button></form>\
         <p>{refresh}</p>",
        view.total_cycle
    )
}

fn render_relay_card(card: &RelayCard, running: bool) -> String {
    let gate = disabled(running);
    let record = &card.record;
    let id = escape(&record.relay_id);
    let selected_class = if card.selected { " selected" } else { "" };
    let checked = if card.selected { " checked" } else { "" };
    let toggle_label = if card.selected { "Deselect" } else { "Select" };
    let sensors = if record.sensor_ids.is_empty() {
        "no sensors yet".to_string()
    } else {
        escape(&record.sensor_ids.join(", "))
    };

    let mut card_html = format!(
        "<div class=\"relay-card{selected_class}\">\
         <form class=\"inline\" method=\"post\" action=\"/manager/relays/{id}/toggle\">\
         <input type=\"checkbox\"{checked} disabled> <strong>Relay {id}</strong> \
         <button type=\"submit\"{gate}>{toggle_label}</button></form>\
         <p>Sensors: {sensors}</p>"
    );
    let _ = write!(
        card_html,
        "<form class=\"inline\" method=\"post\" action=\"/manager/relays/{id}/cycle\">\
         <label>\u{394}t (s): \
         <input type=\"number\" name=\"delta_t\" value=\"{}\" min=\"1\"{gate}></label> \
         <button type=\"submit\"{gate}>Save</button></form> ",
        record.delta_t
    );
    if running {
        card_html.push_str("<button disabled>Delete relay</button></div>");
    } else {
        let _ = write!(
            card_html,
            "<a href=\"/manager/relays/{id}/delete\">Delete relay</a></div>"
        );
    }
    card_html
}

fn render_threshold_form(view: &ManagerView) -> String {
    let t = &view.thresholds;
    let field = |name: &str, value: f64| {
        format!(
            "<label>{name}: <input type=\"number\" step=\"any\" name=\"{name}\" value=\"{value}\"></label> "
        )
    };
    format!(
        "<h2>Alert thresholds</h2>\
         <form method=\"post\" action=\"/manager/thresholds\">\
         {}{}{}{}{}{}<button type=\"submit\">Save thresholds</button></form>",
        field("temp_min", t.temp_min),
        field("temp_max", t.temp_max),
        field("humid_min", t.humid_min),
        field("humid_max", t.humid_max),
        field("soil_min", t.soil_min),
        field("soil_max", t.soil_max),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use cropdash_domain::relay::RelayRecord;
    use cropdash_domain::threshold::ThresholdSet;

    fn view(running: bool) -> ManagerView {
        ManagerView {
            running,
            total_cycle: 120,
            relays: vec![RelayCard {
                record: RelayRecord {
                    relay_id: "R1".to_string(),
                    sensor_ids: vec!["S1".to_string(), "S2".to_string()],
                    delta_t: 60,
                },
                selected: true,
            }],
            thresholds: ThresholdSet::default(),
            banner: None,
        }
    }

    #[test]
    fn should_disable_editing_controls_while_running() {
        let html = render(&view(true));
        assert!(html.contains("name=\"total_cycle\" value=\"120\" min=\"1\" disabled"));
        assert!(html.contains("name=\"delta_t\" value=\"60\" min=\"1\" disabled"));
        assert!(html.contains("<button disabled>Delete relay</button>"));
        assert!(html.contains("refresh paused while running"));
        assert!(html.contains("STOP system"));
    }

    #[test]
    fn should_enable_editing_controls_when_stopped() {
        let html = render(&view(false));
        assert!(html.contains("name=\"total_cycle\" value=\"120\" min=\"1\">"));
        assert!(html.contains("href=\"/manager/relays/R1/delete\""));
        assert!(html.contains("Refresh relay list"));
        assert!(html.contains("START system"));
    }

    #[test]
    fn should_mark_selected_relay_cards() {
        let html = render(&view(false));
        assert!(html.contains("relay-card selected"));
        assert!(html.contains(" checked disabled>"));
        assert!(html.contains(">Deselect<"));
    }

    #[test]
    fn should_render_empty_state_without_relays() {
        let mut v = view(false);
        v.relays.clear();
        let html = render(&v);
        assert!(html.contains("No relays registered yet"));
    }

    #[test]
    fn should_render_confirmation_page_with_hidden_flag() {
        let html = render_delete_confirm("R1");
        assert!(html.contains("action=\"/manager/relays/R1/delete\""));
        assert!(html.contains("name=\"confirmed\" value=\"true\""));
    }

    #[test]
    fn should_list_managed_sensors_on_card() {
        let html = render(&view(false));
        assert!(html.contains("Sensors: S1, S2"));
    }
}
