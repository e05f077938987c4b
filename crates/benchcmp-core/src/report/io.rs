use std::path::Path;

use crate::error::BenchError;
use crate::report::model::ArtilleryReport;

/// Read an Artillery JSON report from disk.
///
/// Failing to open the file is reported together with its path, since the
/// default inputs are bare file names resolved against the working
/// directory.
pub async fn read_report(path: impl AsRef<Path>) -> Result<ArtilleryReport, BenchError> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| BenchError::ReadReport {
            path: path.to_path_buf(),
            source,
        })?;
    let report: ArtilleryReport = serde_json::from_str(&content)?;
    tracing::debug!(
        path = %path.display(),
        summaries = report.aggregate.summaries.len(),
        "loaded report"
    );
    Ok(report)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
