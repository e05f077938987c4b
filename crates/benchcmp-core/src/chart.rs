use std::ops::Range;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::error::BenchError;
use crate::table::{ComparisonTable, PERCENTILE_COLUMNS};

pub const CHART_TITLE: &str = "Latency Comparison (Lower is better)";
pub const Y_AXIS_LABEL: &str = "Milliseconds";
/// 8x6 at 100 pixels per unit.
pub const CHART_SIZE: (u32, u32) = (800, 600);

const COLOURS: [RGBColor; 3] = [
    RGBColor(0x1f, 0x77, 0xb4),
    RGBColor(0xff, 0x7f, 0x0e),
    RGBColor(0x2c, 0xa0, 0x2c),
];

/// Share of each group's slot covered by bars.
const GROUP_FILL: f64 = 0.8;

/// Check that `path` names an SVG file, the only output the chart backend
/// writes.
pub fn ensure_svg_path(path: &Path) -> Result<(), BenchError> {
    let is_svg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    if is_svg {
        Ok(())
    } else {
        Err(BenchError::UnsupportedChartFormat(path.display().to_string()))
    }
}

// ---------------------------------------------------------------------------
// ChartLayout
// ---------------------------------------------------------------------------

/// A single bar in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    /// Index into [`ChartLayout::series`].
    pub series: usize,
    /// Index into [`ChartLayout::groups`].
    pub group: usize,
    pub x0: f64,
    pub x1: f64,
    pub height: f64,
}

/// Geometry of a grouped bar chart: one group per table row, one bar per
/// percentile column. Group `i` occupies `i..i + 1` on the x axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub groups: Vec<String>,
    pub series: Vec<&'static str>,
    pub bars: Vec<Bar>,
    pub y_max: f64,
}

impl ChartLayout {
    pub fn from_table(table: &ComparisonTable) -> Self {
        let series = PERCENTILE_COLUMNS.to_vec();
        let bar_width = GROUP_FILL / series.len() as f64;
        let margin = (1.0 - GROUP_FILL) / 2.0;

        let mut bars = Vec::with_capacity(table.rows().len() * series.len());
        for (group, row) in table.rows().iter().enumerate() {
            for (s, height) in row.metrics.percentiles().into_iter().enumerate() {
                let x0 = group as f64 + margin + s as f64 * bar_width;
                bars.push(Bar {
                    series: s,
                    group,
                    x0,
                    x1: x0 + bar_width,
                    height,
                });
            }
        }

        let tallest = bars.iter().map(|b| b.height).fold(0.0_f64, f64::max);
        let y_max = if tallest > 0.0 { tallest * 1.1 } else { 1.0 };

        Self {
            groups: table.rows().iter().map(|r| r.protocol.clone()).collect(),
            series,
            bars,
            y_max,
        }
    }

    pub fn x_range(&self) -> Range<f64> {
        0.0..self.groups.len() as f64
    }

    /// Label for an x-axis tick, present only at group centres.
    pub fn group_label(&self, x: f64) -> Option<&str> {
        let centre = x - 0.5;
        if centre < 0.0 || (centre - centre.round()).abs() > 1e-6 {
            return None;
        }
        self.groups.get(centre.round() as usize).map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render the percentile columns of `table` as a grouped bar chart and
/// write it to `path` as SVG.
pub fn render_latency_chart(table: &ComparisonTable, path: &Path) -> Result<(), BenchError> {
    if table.is_empty() {
        return Err(BenchError::Validation(
            "cannot chart an empty comparison table".to_string(),
        ));
    }
    ensure_svg_path(path)?;
    let layout = ChartLayout::from_table(table);

    draw(SVGBackend::new(path, CHART_SIZE).into_drawing_area(), &layout)
        .map_err(|e| BenchError::Chart(e.to_string()))?;

    tracing::info!(path = %path.display(), bars = layout.bars.len(), "wrote latency chart");
    Ok(())
}

fn draw<DB>(root: DrawingArea<DB, Shift>, layout: &ChartLayout) -> Result<(), Box<dyn std::error::Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(CHART_TITLE, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(layout.x_range(), 0.0..layout.y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(layout.groups.len() * 2 + 1)
        .x_label_formatter(&|x| layout.group_label(*x).unwrap_or_default().to_string())
        .x_desc("Protocol")
        .y_desc(Y_AXIS_LABEL)
        .draw()?;

    for (index, name) in layout.series.iter().enumerate() {
        let colour = COLOURS[index % COLOURS.len()];
        chart
            .draw_series(
                layout
                    .bars
                    .iter()
                    .filter(|b| b.series == index)
                    .map(|b| Rectangle::new([(b.x0, 0.0), (b.x1, b.height)], colour.filled())),
            )?
            .label(*name)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], colour.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
