use std::path::Path;

use crate::error::BenchError;
use crate::metrics::{extract_http_metrics, extract_metrics, extract_ws_metrics, Protocol};
use crate::regression::{check_regression, RegressionReport};
use crate::report::read_report;
use crate::table::ComparisonTable;
use crate::thresholds::Thresholds;

pub const DEFAULT_HTTP_REPORT: &str = "artillery-baseline.json";
pub const DEFAULT_WS_REPORT: &str = "artillery-ws.json";

/// Load the HTTP and WebSocket reports and build the comparison table.
///
/// Reports are read in order and the first failure aborts the run.
pub async fn compare_reports(
    http_report: impl AsRef<Path>,
    ws_report: impl AsRef<Path>,
) -> Result<ComparisonTable, BenchError> {
    let http = read_report(http_report).await?;
    let ws = read_report(ws_report).await?;

    let table = ComparisonTable::new(extract_http_metrics(&http)?, extract_ws_metrics(&ws)?);
    tracing::info!(rows = table.rows().len(), "built comparison table");
    Ok(table)
}

/// Check a current report against a baseline report of the same protocol.
pub async fn check_reports(
    baseline: impl AsRef<Path>,
    current: impl AsRef<Path>,
    protocol: Protocol,
    thresholds: &Thresholds,
) -> Result<RegressionReport, BenchError> {
    let baseline = extract_metrics(&read_report(baseline).await?, protocol)?;
    let current = extract_metrics(&read_report(current).await?, protocol)?;
    Ok(check_regression(&baseline, &current, thresholds))
}
