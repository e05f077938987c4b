pub mod export;

use serde::{Deserialize, Serialize};

use crate::metrics::{MetricsRow, Protocol};

/// Column headers, in display order.
pub const COLUMNS: [&str; 6] = [
    "Protocol",
    "p50",
    "p90",
    "p95",
    "Error Rate (%)",
    "Throughput (req/s)",
];

/// Headers of the percentile columns drawn on the latency chart.
pub const PERCENTILE_COLUMNS: [&str; 3] = ["p50", "p90", "p95"];

// ---------------------------------------------------------------------------
// ComparisonRow / ComparisonTable
// ---------------------------------------------------------------------------

/// One labelled row of the comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub protocol: String,
    #[serde(flatten)]
    pub metrics: MetricsRow,
}

impl ComparisonRow {
    /// Cell values for every column after `Protocol`, in column order.
    pub fn values(&self) -> [f64; 5] {
        let (p50, p90, p95, error_rate, throughput) = self.metrics.as_tuple();
        [p50, p90, p95, error_rate, throughput]
    }
}

/// Side-by-side metrics of several test runs, keyed by protocol label.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComparisonTable {
    rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    /// The standard two-row table: HTTP first, WebSocket second.
    pub fn new(http: MetricsRow, websocket: MetricsRow) -> Self {
        Self::from_rows([
            (Protocol::Http.label(), http),
            (Protocol::WebSocket.label(), websocket),
        ])
    }

    pub fn from_rows<L>(rows: impl IntoIterator<Item = (L, MetricsRow)>) -> Self
    where
        L: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|(label, metrics)| ComparisonRow {
                    protocol: label.into(),
                    metrics,
                })
                .collect(),
        }
    }

    pub fn rows(&self) -> &[ComparisonRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Look up a row by its protocol label.
    pub fn get(&self, label: &str) -> Option<&MetricsRow> {
        self.rows
            .iter()
            .find(|r| r.protocol == label)
            .map(|r| &r.metrics)
    }

    /// Render as an aligned plain-text table.
    ///
    /// The label column is left-aligned, numeric columns are right-aligned
    /// and printed with two decimals.
    pub fn render_text(&self) -> String {
        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| {
                std::iter::once(row.protocol.clone())
                    .chain(row.values().iter().map(|v| format!("{v:.2}")))
                    .collect()
            })
            .collect();

        let widths: Vec<usize> = COLUMNS
            .iter()
            .enumerate()
            .map(|(i, header)| {
                cells
                    .iter()
                    .map(|r| r[i].chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        let header: Vec<&str> = COLUMNS.to_vec();
        push_line(&mut out, &header, &widths);
        for row in &cells {
            let row: Vec<&str> = row.iter().map(String::as_str).collect();
            push_line(&mut out, &row, &widths);
        }
        out
    }
}

impl std::fmt::Display for ComparisonTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render_text())
    }
}

fn push_line(out: &mut String, cells: &[&str], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, &width))| {
            if i == 0 {
                format!("{cell:<width$}")
            } else {
                format!("{cell:>width$}")
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
