use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::BenchError;

pub const VUSERS_CREATED: &str = "vusers.created";
pub const VUSERS_FAILED: &str = "vusers.failed";

// ---------------------------------------------------------------------------
// ArtilleryReport
// ---------------------------------------------------------------------------

/// An Artillery JSON report as written by `artillery run --output`.
///
/// Only the `aggregate` section is modelled; intermediate per-period
/// snapshots and any other top-level keys are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtilleryReport {
    pub aggregate: AggregateReport,
}

/// Whole-run totals for a single Artillery test.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregateReport {
    /// Monotonic counters such as `vusers.created` and `vusers.failed`.
    pub counters: HashMap<String, f64>,
    /// Per-second rates such as `http.request_rate`.
    pub rates: HashMap<String, f64>,
    /// Latency distributions keyed by metric name. Kept as raw JSON so a
    /// malformed summary only fails when it is actually looked up.
    pub summaries: HashMap<String, serde_json::Value>,
}

impl AggregateReport {
    /// Value of a counter, or 0 if the load tool never emitted it.
    pub fn counter(&self, name: &str) -> f64 {
        self.counters.get(name).copied().unwrap_or(0.0)
    }

    /// Value of a rate, or 0 if absent.
    pub fn rate(&self, name: &str) -> f64 {
        self.rates.get(name).copied().unwrap_or(0.0)
    }

    /// Look up and decode the latency summary for `metric`.
    ///
    /// Unlike counters and rates there is no sensible default for a missing
    /// summary, so absence is an error.
    pub fn summary(&self, metric: &str) -> Result<MetricSummary, BenchError> {
        let raw = self
            .summaries
            .get(metric)
            .ok_or_else(|| BenchError::MissingSummary(metric.to_string()))?;
        Ok(MetricSummary::deserialize(raw)?)
    }
}

// ---------------------------------------------------------------------------
// MetricSummary
// ---------------------------------------------------------------------------

/// Percentile summary of one latency metric (milliseconds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub p50: f64,
    pub p90: f64,
    pub p95: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p99: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<f64>,
}
