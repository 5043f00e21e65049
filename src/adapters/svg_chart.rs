//! SVG rendering of the financial ledger.
//!
//! Draws costs, revenue and profit per recorded day either as grouped bars or
//! as three polylines, with a zero baseline and a legend.

use crate::domain::error::ShelfError;
use crate::domain::finance::FinancialRecord;
use crate::ports::chart_port::{ChartKind, ChartPort};
use std::fs;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 400;

const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 120.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 60.0;
const BAR_FRACTION: f64 = 0.2;
const MIN_PLOT_SIDE: f64 = 100.0;
const POINT_RADIUS: f64 = 3.0;

/// Smallest chart sizes that still leave a `MIN_PLOT_SIDE` plot area.
pub const MIN_WIDTH: u32 = (MARGIN_LEFT + MARGIN_RIGHT + MIN_PLOT_SIDE) as u32;
pub const MIN_HEIGHT: u32 = (MARGIN_TOP + MARGIN_BOTTOM + MIN_PLOT_SIDE) as u32;

const SERIES: [(&str, &str); 3] = [
    ("Costs", "#00bcd4"),
    ("Revenue", "#ff9800"),
    ("Profit", "#4caf50"),
];

fn series_values(record: &FinancialRecord) -> [f64; 3] {
    [record.costs, record.revenue, record.profit]
}

pub struct SvgChartAdapter {
    width: u32,
    height: u32,
}

impl SvgChartAdapter {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for SvgChartAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl ChartPort for SvgChartAdapter {
    fn render(
        &self,
        records: &[FinancialRecord],
        kind: ChartKind,
        output_path: &Path,
    ) -> Result<(), ShelfError> {
        let svg = generate_financial_svg(records, kind, self.width as f64, self.height as f64);
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(output_path, svg)?;
        debug!(path = %output_path.display(), points = records.len(), "wrote chart");
        Ok(())
    }
}

/// Render `records` (sorted by date) into a standalone SVG document.
pub fn generate_financial_svg(
    records: &[FinancialRecord],
    kind: ChartKind,
    width: f64,
    height: f64,
) -> String {
    let values = records.iter().flat_map(series_values);
    let (min_value, max_value) = values.fold((0.0_f64, 0.0_f64), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    let range = (max_value - min_value).max(1.0);

    let plot_width = (width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0);
    let plot_height = (height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0);
    let slot = plot_width / records.len().max(1) as f64;

    let x_center = |i: usize| -> f64 { MARGIN_LEFT + slot * (i as f64 + 0.5) };
    let y_scale =
        |v: f64| -> f64 { MARGIN_TOP + plot_height - ((v - min_value) / range) * plot_height };
    let baseline = y_scale(0.0);

    let mut svg = String::new();
    svg.push_str(&format!(
        r##"<svg width="{}" height="{}" viewBox="0 0 {} {}" xmlns="http://www.w3.org/2000/svg">"##,
        width, height, width, height
    ));
    svg.push_str("\n  <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");
    svg.push_str(&format!(
        "  <text x=\"{:.1}\" y=\"20\" text-anchor=\"middle\" font-size=\"14\" fill=\"#333\">Financial overview for each day</text>\n",
        MARGIN_LEFT + plot_width / 2.0
    ));
    svg.push_str(&format!(
        "  <text x=\"15\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"11\" fill=\"#666\" transform=\"rotate(-90 15 {:.1})\">Costs, revenue and profit</text>\n",
        MARGIN_TOP + plot_height / 2.0,
        MARGIN_TOP + plot_height / 2.0
    ));
    svg.push_str(&format!(
        "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"11\" fill=\"#666\">Days (MM-DD)</text>\n",
        MARGIN_LEFT + plot_width / 2.0,
        height - 10.0
    ));

    // Axes and zero baseline
    svg.push_str(&format!(
        "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"#ccc\" stroke-width=\"1\"/>\n",
        MARGIN_LEFT,
        MARGIN_TOP,
        MARGIN_LEFT,
        MARGIN_TOP + plot_height
    ));
    svg.push_str(&format!(
        "  <line class=\"baseline\" x1=\"{}\" y1=\"{:.1}\" x2=\"{}\" y2=\"{:.1}\" stroke=\"black\" stroke-width=\"0.8\"/>\n",
        MARGIN_LEFT,
        baseline,
        MARGIN_LEFT + plot_width,
        baseline
    ));
    for value in [max_value, 0.0, min_value] {
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"10\" fill=\"#666\">{:.2}</text>\n",
            MARGIN_LEFT - 5.0,
            y_scale(value) + 3.0,
            value
        ));
    }

    for (i, record) in records.iter().enumerate() {
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"10\" fill=\"#666\">{}</text>\n",
            x_center(i),
            MARGIN_TOP + plot_height + 15.0,
            record.date.format("%m-%d")
        ));
    }

    match kind {
        ChartKind::Bar => {
            let bar_width = slot * BAR_FRACTION;
            for (i, record) in records.iter().enumerate() {
                for (s, value) in series_values(record).into_iter().enumerate() {
                    let x = x_center(i) + (s as f64 - 1.5) * bar_width;
                    let y = y_scale(value.max(0.0));
                    let h = (y_scale(value) - baseline).abs();
                    svg.push_str(&format!(
                        "  <rect class=\"bar\" x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{}\"/>\n",
                        x, y, bar_width, h, SERIES[s].1
                    ));
                }
            }
        }
        ChartKind::Line => {
            for (s, (_, color)) in SERIES.iter().enumerate() {
                let mut path_data = String::new();
                for (i, record) in records.iter().enumerate() {
                    let cmd = if i == 0 { "M" } else { " L" };
                    path_data.push_str(&format!(
                        "{} {:.1} {:.1}",
                        cmd,
                        x_center(i),
                        y_scale(series_values(record)[s])
                    ));
                }
                svg.push_str(&format!(
                    "  <path class=\"series\" d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"2\"/>\n",
                    path_data, color
                ));
                // One marker per point, so a single day still shows.
                for (i, record) in records.iter().enumerate() {
                    svg.push_str(&format!(
                        "  <circle class=\"point\" cx=\"{:.1}\" cy=\"{:.1}\" r=\"{}\" fill=\"{}\"/>\n",
                        x_center(i),
                        y_scale(series_values(record)[s]),
                        POINT_RADIUS,
                        color
                    ));
                }
            }
        }
    }

    // Legend
    let legend_x = MARGIN_LEFT + plot_width + 15.0;
    for (s, (label, color)) in SERIES.iter().enumerate() {
        let y = MARGIN_TOP + 10.0 + s as f64 * 18.0;
        svg.push_str(&format!(
            "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"12\" height=\"12\" fill=\"{}\"/>\n",
            legend_x,
            y - 10.0,
            color
        ));
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"11\" fill=\"#333\">{}</text>\n",
            legend_x + 18.0,
            y,
            label
        ));
    }

    svg.push_str("</svg>");
    svg
}
