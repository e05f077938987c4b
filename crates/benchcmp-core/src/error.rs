use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Failed to read report {}: {source}", .path.display())]
    ReadReport {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read thresholds {}: {source}", .path.display())]
    ReadThresholds {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Report has no summary for metric '{0}'")]
    MissingSummary(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Chart error: {0}")]
    Chart(String),

    #[error("Unsupported chart format: {0} (expected .svg)")]
    UnsupportedChartFormat(String),

    #[error("Validation error: {0}")]
    Validation(String),
}
