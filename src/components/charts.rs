//! SVG charts for the admin dashboard

use std::f64::consts::PI;

use leptos::prelude::*;

const VIEW_WIDTH: f64 = 320.0;
const VIEW_HEIGHT: f64 = 220.0;
const BAR_AREA_HEIGHT: f64 = 180.0;
const PIE_RADIUS: f64 = 90.0;

/// One value in a chart
#[derive(Clone, Debug, PartialEq)]
pub struct ChartSeries {
    pub label: &'static str,
    pub value: usize,
    pub fill: &'static str,
    pub stroke: &'static str,
}

/// Donor and recipient counts as chart series
pub fn account_series(donors: usize, recipients: usize) -> Vec<ChartSeries> {
    vec![
        ChartSeries { label: "Donors", value: donors, fill: "#34D399", stroke: "#059669" },
        ChartSeries { label: "Recipients", value: recipients, fill: "#60A5FA", stroke: "#2563EB" },
    ]
}

/// Bar heights scaled so the largest value fills `max_height`
pub fn bar_heights(values: &[usize], max_height: f64) -> Vec<f64> {
    let max = values.iter().copied().max().unwrap_or(0);
    if max == 0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|&v| v as f64 / max as f64 * max_height).collect()
}

/// Start and end angles (radians, clockwise from 12 o'clock) per value.
/// Zero-valued entries get an empty slice.
pub fn pie_slices(values: &[usize]) -> Vec<(f64, f64)> {
    let total: usize = values.iter().sum();
    let mut start = 0.0;
    values
        .iter()
        .map(|&v| {
            let sweep = if total == 0 { 0.0 } else { v as f64 / total as f64 * 2.0 * PI };
            let slice = (start, start + sweep);
            start += sweep;
            slice
        })
        .collect()
}

/// SVG path for a pie slice centred at (cx, cy)
pub fn arc_path(cx: f64, cy: f64, radius: f64, start: f64, end: f64) -> String {
    let sweep = end - start;
    if sweep <= 0.0 {
        return String::new();
    }
    // A single arc cannot draw a full circle
    if sweep >= 2.0 * PI - 1e-9 {
        return format!(
            "M {cx:.2} {top:.2} A {radius:.2} {radius:.2} 0 1 1 {cx:.2} {bottom:.2} A {radius:.2} {radius:.2} 0 1 1 {cx:.2} {top:.2} Z",
            top = cy - radius,
            bottom = cy + radius,
        );
    }
    let point = |angle: f64| (cx + radius * angle.sin(), cy - radius * angle.cos());
    let (x0, y0) = point(start);
    let (x1, y1) = point(end);
    let large_arc = if sweep > PI { 1 } else { 0 };
    format!("M {cx:.2} {cy:.2} L {x0:.2} {y0:.2} A {radius:.2} {radius:.2} 0 {large_arc} 1 {x1:.2} {y1:.2} Z")
}

#[component]
pub fn BarChart(#[prop(into)] series: Signal<Vec<ChartSeries>>) -> impl IntoView {
    let bars = move || {
        let series = series.get();
        let values: Vec<usize> = series.iter().map(|s| s.value).collect();
        let heights = bar_heights(&values, BAR_AREA_HEIGHT - 20.0);
        let slot = VIEW_WIDTH / series.len().max(1) as f64;
        series
            .into_iter()
            .zip(heights)
            .enumerate()
            .map(|(index, (entry, height))| {
                let x = slot * index as f64 + slot * 0.25;
                let y = BAR_AREA_HEIGHT - height;
                view! {
                    <g class="bar">
                        <rect
                            x=format!("{x:.2}")
                            y=format!("{y:.2}")
                            width=format!("{:.2}", slot * 0.5)
                            height=format!("{height:.2}")
                            fill=entry.fill
                            stroke=entry.stroke
                            stroke-width="2"
                        />
                        <text x=format!("{:.2}", x + slot * 0.25) y=format!("{:.2}", y - 6.0) text-anchor="middle">
                            {entry.value}
                        </text>
                        <text x=format!("{:.2}", x + slot * 0.25) y=format!("{:.2}", BAR_AREA_HEIGHT + 20.0) text-anchor="middle">
                            {entry.label}
                        </text>
                    </g>
                }
            })
            .collect_view()
    };

    view! {
        <svg class="chart bar-chart" viewBox=format!("0 0 {VIEW_WIDTH} {VIEW_HEIGHT}") role="img">
            <line x1="0" y1=BAR_AREA_HEIGHT.to_string() x2=VIEW_WIDTH.to_string() y2=BAR_AREA_HEIGHT.to_string() stroke="#D1D5DB" />
            {bars}
        </svg>
    }
}

#[component]
pub fn PieChart(#[prop(into)] series: Signal<Vec<ChartSeries>>) -> impl IntoView {
    let cx = VIEW_WIDTH / 2.0;
    let cy = VIEW_HEIGHT / 2.0;

    let slices = move || {
        let series = series.get();
        let values: Vec<usize> = series.iter().map(|s| s.value).collect();
        if values.iter().all(|&v| v == 0) {
            return view! {
                <circle cx=cx.to_string() cy=cy.to_string() r=PIE_RADIUS.to_string() fill="#F3F4F6" stroke="#D1D5DB" />
            }
            .into_any();
        }
        series
            .into_iter()
            .zip(pie_slices(&values))
            .map(|(entry, (start, end))| {
                view! {
                    <path
                        d=arc_path(cx, cy, PIE_RADIUS, start, end)
                        fill=entry.fill
                        stroke=entry.stroke
                        stroke-width="2"
                    >
                        <title>{format!("{}: {}", entry.label, entry.value)}</title>
                    </path>
                }
            })
            .collect_view()
            .into_any()
    };

    let legend = move || {
        series
            .get()
            .into_iter()
            .map(|entry| view! {
                <li>
                    <span class="legend-swatch" style=format!("background: {}", entry.fill)></span>
                    {format!("{} ({})", entry.label, entry.value)}
                </li>
            })
            .collect_view()
    };

    view! {
        <div class="pie-chart">
            <svg class="chart" viewBox=format!("0 0 {VIEW_WIDTH} {VIEW_HEIGHT}") role="img">
                {slices}
            </svg>
            <ul class="chart-legend">{legend}</ul>
        </div>
    }
}
