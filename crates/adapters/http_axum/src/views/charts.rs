//! Inline SVG time-series panels with threshold reference lines.

use super::{escape, measurement};

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 220.0;
const PAD_LEFT: f64 = 48.0;
const PAD_RIGHT: f64 = 12.0;
const PAD_TOP: f64 = 14.0;
const PAD_BOTTOM: f64 = 22.0;

/// Render one dimension's history as an SVG line panel.
///
/// `values` must be in chronological order. Two dashed reference lines are
/// drawn at `min_bound` and `max_bound`; the y-domain always spans both
/// bounds so they stay visible. `NaN` samples are skipped.
#[must_use]
pub fn line_panel(title: &str, values: &[f64], min_bound: f64, max_bound: f64) -> String {
    let finite: Vec<(usize, f64)> = values
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .collect();

    if finite.is_empty() {
        return format!(
            "<div class=\"chart-panel\"><h3>{}</h3><p class=\"loading\">no data for this range</p></div>",
            escape(title)
        );
    }

    let mut lo = min_bound.min(max_bound);
    let mut hi = min_bound.max(max_bound);
    for &(_, v) in &finite {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    // Breathing room so extremes do not sit on the frame edge.
    let span = if (hi - lo).abs() < f64::EPSILON { 1.0 } else { hi - lo };
    let lo = lo - span * 0.05;
    let hi = hi + span * 0.05;

    let x = |index: usize| {
        let denominator = values.len().saturating_sub(1).max(1) as f64;
        PAD_LEFT + (index as f64 / denominator) * (WIDTH - PAD_LEFT - PAD_RIGHT)
    };
    let y = |value: f64| {
        PAD_TOP + (1.0 - (value - lo) / (hi - lo)) * (HEIGHT - PAD_TOP - PAD_BOTTOM)
    };

    let points: Vec<String> = finite
        .iter()
        .map(|&(index, value)| format!("{:.1},{:.1}", x(index), y(value)))
        .collect();

    let bound_line = |value: f64, label: &str, color: &str| {
        format!(
            "<line x1=\"{PAD_LEFT:.1}\" y1=\"{0:.1}\" x2=\"{1:.1}\" y2=\"{0:.1}\" \
             stroke=\"{color}\" stroke-width=\"1.5\" stroke-dasharray=\"5,5\"/>\
             <text x=\"2\" y=\"{2:.1}\" font-size=\"10\" fill=\"{color}\">{label} {3}</text>",
            y(value),
            WIDTH - PAD_RIGHT,
            y(value) + 3.0,
            measurement(value),
        )
    };

    format!(
        "<div class=\"chart-panel\"><h3>{}</h3>\
         <svg viewBox=\"0 0 {WIDTH:.0} {HEIGHT:.0}\" role=\"img\">\
         <rect x=\"{PAD_LEFT:.1}\" y=\"{PAD_TOP:.1}\" width=\"{plot_w:.1}\" height=\"{plot_h:.1}\" \
         fill=\"#fafafa\" stroke=\"#e2e8f0\"/>\
         {max_line}{min_line}\
         <polyline fill=\"none\" stroke=\"#16a34a\" stroke-width=\"2\" points=\"{points}\"/>\
         </svg></div>",
        escape(title),
        plot_w = WIDTH - PAD_LEFT - PAD_RIGHT,
        plot_h = HEIGHT - PAD_TOP - PAD_BOTTOM,
        max_line = bound_line(max_bound, "max", "#dc2626"),
        min_line = bound_line(min_bound, "min", "#2563eb"),
        points = points.join(" "),
    )
}
