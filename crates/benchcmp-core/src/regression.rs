use serde::{Deserialize, Serialize};

use crate::metrics::MetricsRow;
use crate::thresholds::{MetricKey, Thresholds};

/// One threshold breach found by [`check_regression`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// Current value grew past `baseline * (1 + tolerance)`.
    ExceedsTolerance {
        metric: MetricKey,
        baseline: f64,
        current: f64,
        tolerance: f64,
    },
    /// Current value is above the absolute ceiling.
    ExceedsMax {
        metric: MetricKey,
        current: f64,
        max: f64,
    },
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::ExceedsTolerance {
                metric,
                baseline,
                current,
                tolerance,
            } => write!(
                f,
                "{metric}: {current:.2} > {baseline:.2} (tolerance: {}%)",
                tolerance * 100.0
            ),
            Violation::ExceedsMax {
                metric,
                current,
                max,
            } => write!(f, "{metric}: {current:.2} > max value of {max}"),
        }
    }
}

/// Outcome of comparing a run against its baseline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegressionReport {
    pub violations: Vec<Violation>,
}

impl RegressionReport {
    pub fn is_regression(&self) -> bool {
        !self.violations.is_empty()
    }
}

/// Compare `current` against `baseline` for every metric in `thresholds`.
///
/// A metric can violate both its tolerance and its ceiling; each breach is
/// reported separately.
pub fn check_regression(
    baseline: &MetricsRow,
    current: &MetricsRow,
    thresholds: &Thresholds,
) -> RegressionReport {
    let mut violations = Vec::new();

    for (metric, threshold) in thresholds.iter() {
        let base = metric.value_of(baseline);
        let cur = metric.value_of(current);

        if cur > base * (1.0 + threshold.tolerance) {
            violations.push(Violation::ExceedsTolerance {
                metric,
                baseline: base,
                current: cur,
                tolerance: threshold.tolerance,
            });
        }
        if cur > threshold.max {
            violations.push(Violation::ExceedsMax {
                metric,
                current: cur,
                max: threshold.max,
            });
        }
    }

    if !violations.is_empty() {
        tracing::debug!(count = violations.len(), "regression detected");
    }
    RegressionReport { violations }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
