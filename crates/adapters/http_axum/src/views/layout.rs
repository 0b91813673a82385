//! Page shell — nav bar, banner, and the shared stylesheet.

use cropdash_app::view::{Banner, BannerKind};

use super::escape;

/// Which nav entry is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTab {
    Manager,
    General,
    Detail,
}

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:0;background:#f4f6f4;color:#1e293b}\
.container{max-width:1100px;margin:0 auto;padding:1rem}\
nav{display:flex;gap:.5rem;padding:.75rem 1rem;background:#14532d}\
nav a{color:#dcfce7;text-decoration:none;padding:.4rem .8rem;border-radius:4px}\
nav a.active{background:#22c55e;color:#052e16}\
.banner{padding:.6rem .9rem;border-radius:4px;margin:.75rem 0}\
.banner-error{background:#fee2e2;color:#991b1b}\
.banner-success{background:#dcfce7;color:#14532d}\
table.data{width:100%;border-collapse:collapse;background:#fff}\
table.data th,table.data td{border:1px solid #e2e8f0;padding:.45rem .6rem;text-align:left}\
tr.relay-row{background:#f0fdf4;font-weight:600}\
.status-normal{color:#15803d}\
.status-warning{color:#b45309}\
.status-danger{color:#b91c1c;font-weight:700}\
.relay-grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(240px,1fr));gap:.75rem}\
.relay-card{background:#fff;border:1px solid #e2e8f0;border-radius:6px;padding:.75rem}\
.relay-card.selected{border-color:#22c55e;box-shadow:0 0 0 1px #22c55e}\
.loading{padding:1rem;color:#64748b}\
.info-cards{display:flex;gap:.75rem;flex-wrap:wrap;margin:.75rem 0}\
.info-card{background:#fff;border:1px solid #e2e8f0;border-radius:6px;padding:.6rem .9rem}\
.chart-panel{background:#fff;border:1px solid #e2e8f0;border-radius:6px;padding:.6rem;margin:.75rem 0}\
form.inline{display:inline}\
button:disabled,input:disabled{opacity:.5}";

/// Assemble a full page around a rendered body fragment.
#[must_use]
pub fn page(title: &str, active: NavTab, banner: Option<&Banner>, body: &str) -> String {
    let nav = nav_bar(active);
    let banner_html = banner.map(render_banner).unwrap_or_default();
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{} — cropdash</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         {nav}\n<div class=\"container\">\n{banner_html}{body}\n</div>\n</body>\n</html>",
        escape(title)
    )
}

fn nav_bar(active: NavTab) -> String {
    let mark = |tab: NavTab| if tab == active { " class=\"active\"" } else { "" };
    format!(
        "<nav><a href=\"/manager\"{}>Relay manager</a>\
         <a href=\"/general\"{}>Dashboard</a></nav>",
        mark(NavTab::Manager),
        mark(NavTab::General),
    )
}

fn render_banner(banner: &Banner) -> String {
    let class = match banner.kind {
        BannerKind::Success => "banner-success",
        BannerKind::Error => "banner-error",
    };
    format!(
        "<div class=\"banner {class}\">{}</div>",
        escape(&banner.message)
    )
}
