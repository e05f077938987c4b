use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::BenchError;
use crate::metrics::MetricsRow;

// ---------------------------------------------------------------------------
// MetricKey
// ---------------------------------------------------------------------------

/// A lower-is-better metric that can carry a regression threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    P50,
    P90,
    P95,
    ErrorRatePercent,
}

impl MetricKey {
    pub fn value_of(self, row: &MetricsRow) -> f64 {
        match self {
            MetricKey::P50 => row.p50,
            MetricKey::P90 => row.p90,
            MetricKey::P95 => row.p95,
            MetricKey::ErrorRatePercent => row.error_rate_percent,
        }
    }
}

impl std::fmt::Display for MetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MetricKey::P50 => "p50",
            MetricKey::P90 => "p90",
            MetricKey::P95 => "p95",
            MetricKey::ErrorRatePercent => "error_rate_percent",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// Threshold / Thresholds
// ---------------------------------------------------------------------------

/// Limits for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    /// Absolute ceiling for the current value.
    pub max: f64,
    /// Allowed relative increase over the baseline (0.1 = 10%).
    pub tolerance: f64,
}

/// Per-metric thresholds, serialized as a JSON object keyed by metric name:
///
/// ```json
/// { "p95": { "max": 500, "tolerance": 0.1 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Thresholds(pub BTreeMap<MetricKey, Threshold>);

impl Default for Thresholds {
    fn default() -> Self {
        Self(BTreeMap::from([
            (
                MetricKey::P95,
                Threshold {
                    max: 500.0,
                    tolerance: 0.1,
                },
            ),
            (
                MetricKey::ErrorRatePercent,
                Threshold {
                    max: 1.0,
                    tolerance: 0.5,
                },
            ),
        ]))
    }
}

impl Thresholds {
    pub fn iter(&self) -> impl Iterator<Item = (MetricKey, &Threshold)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }
}

/// Validate thresholds and return every problem found.
///
/// An empty `Vec` means the thresholds are usable.
pub fn validate_thresholds(thresholds: &Thresholds) -> Vec<BenchError> {
    let mut errors = Vec::new();

    for (metric, t) in thresholds.iter() {
        if !t.max.is_finite() || t.max < 0.0 {
            errors.push(BenchError::Validation(format!(
                "Threshold '{metric}': max must be a non-negative number (got: {})",
                t.max
            )));
        }
        if !t.tolerance.is_finite() || t.tolerance < 0.0 {
            errors.push(BenchError::Validation(format!(
                "Threshold '{metric}': tolerance must be a non-negative number (got: {})",
                t.tolerance
            )));
        }
    }

    errors
}

/// Read thresholds from a JSON file and validate them.
///
/// Only the first validation error is returned; the rest are logged.
pub async fn load_thresholds(path: impl AsRef<Path>) -> Result<Thresholds, BenchError> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| BenchError::ReadThresholds {
            path: path.to_path_buf(),
            source,
        })?;
    let thresholds: Thresholds = serde_json::from_str(&content)?;

    let mut errors = validate_thresholds(&thresholds).into_iter();
    if let Some(first) = errors.next() {
        for rest in errors {
            tracing::warn!("{rest}");
        }
        return Err(first);
    }
    Ok(thresholds)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
