use serde::{Deserialize, Serialize};

use crate::error::BenchError;
use crate::report::model::{ArtilleryReport, VUSERS_CREATED, VUSERS_FAILED};

// ---------------------------------------------------------------------------
// Protocol
// ---------------------------------------------------------------------------

/// The transport exercised by an Artillery test, which decides the metric
/// names the report uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Protocol {
    Http,
    #[serde(rename = "websocket")]
    WebSocket,
}

impl Protocol {
    /// Row label used in the comparison table and the chart.
    pub fn label(self) -> &'static str {
        match self {
            Protocol::Http => "HTTP (REST)",
            Protocol::WebSocket => "WebSocket",
        }
    }

    /// Summary holding the response time percentiles.
    pub fn summary_key(self) -> &'static str {
        match self {
            Protocol::Http => "http.response_time",
            Protocol::WebSocket => "socketio.response_time",
        }
    }

    /// Rate used as throughput.
    pub fn rate_key(self) -> &'static str {
        match self {
            Protocol::Http => "http.request_rate",
            Protocol::WebSocket => "socketio.emit_rate",
        }
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// MetricsRow
// ---------------------------------------------------------------------------

/// Headline numbers for one test run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsRow {
    /// 50th percentile response time (ms).
    pub p50: f64,
    /// 90th percentile response time (ms).
    pub p90: f64,
    /// 95th percentile response time (ms).
    pub p95: f64,
    /// Failed virtual users as a percentage of created ones.
    pub error_rate_percent: f64,
    /// Requests (or emits) per second.
    pub throughput: f64,
}

impl MetricsRow {
    /// The row as an ordered tuple `(p50, p90, p95, error_rate, throughput)`.
    pub fn as_tuple(&self) -> (f64, f64, f64, f64, f64) {
        (
            self.p50,
            self.p90,
            self.p95,
            self.error_rate_percent,
            self.throughput,
        )
    }

    pub fn percentiles(&self) -> [f64; 3] {
        [self.p50, self.p90, self.p95]
    }
}

/// Percentage of virtual users that failed. Zero created users yields 0.
pub fn error_rate_percent(created: f64, failed: f64) -> f64 {
    if created > 0.0 {
        failed / created * 100.0
    } else {
        0.0
    }
}

/// Extract the headline metrics for `protocol` from a report.
pub fn extract_metrics(
    report: &ArtilleryReport,
    protocol: Protocol,
) -> Result<MetricsRow, BenchError> {
    let agg = &report.aggregate;
    let summary = agg.summary(protocol.summary_key())?;

    let created = agg.counter(VUSERS_CREATED);
    let failed = agg.counter(VUSERS_FAILED);

    let row = MetricsRow {
        p50: summary.p50,
        p90: summary.p90,
        p95: summary.p95,
        error_rate_percent: error_rate_percent(created, failed),
        throughput: agg.rate(protocol.rate_key()),
    };
    tracing::debug!(%protocol, ?row, "extracted metrics");
    Ok(row)
}

pub fn extract_http_metrics(report: &ArtilleryReport) -> Result<MetricsRow, BenchError> {
    extract_metrics(report, Protocol::Http)
}

pub fn extract_ws_metrics(report: &ArtilleryReport) -> Result<MetricsRow, BenchError> {
    extract_metrics(report, Protocol::WebSocket)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn report(value: serde_json::Value) -> ArtilleryReport {
        serde_json::from_value(value).expect("report should deserialize")
    }

    fn baseline() -> ArtilleryReport {
        report(json!({
            "aggregate": {
                "summaries": {"http.response_time": {"p50": 10, "p90": 20, "p95": 25}},
                "counters": {"vusers.created": 100, "vusers.failed": 5},
                "rates": {"http.request_rate": 50}
            }
        }))
    }

    #[test]
    fn http_baseline_scenario() {
        let row = extract_http_metrics(&baseline()).expect("extraction should succeed");
        assert_eq!(row.as_tuple(), (10.0, 20.0, 25.0, 5.0, 50.0));
    }

    #[test]
    fn websocket_uses_socketio_keys() {
        let ws = report(json!({
            "aggregate": {
                "summaries": {
                    "http.response_time": {"p50": 999, "p90": 999, "p95": 999},
                    "socketio.response_time": {"p50": 3.5, "p90": 7.1, "p95": 9.0}
                },
                "counters": {"vusers.created": 40, "vusers.failed": 1},
                "rates": {"http.request_rate": 999, "socketio.emit_rate": 120}
            }
        }));
        let row = extract_ws_metrics(&ws).expect("extraction should succeed");
        assert_eq!(row.as_tuple(), (3.5, 7.1, 9.0, 2.5, 120.0));
    }

    #[test]
    fn zero_created_users_gives_zero_error_rate() {
        let r = report(json!({
            "aggregate": {
                "summaries": {"http.response_time": {"p50": 1, "p90": 2, "p95": 3}},
                "counters": {"vusers.created": 0, "vusers.failed": 0},
                "rates": {"http.request_rate": 0}
            }
        }));
        let row = extract_http_metrics(&r).expect("extraction should succeed");
        assert_eq!(row.error_rate_percent, 0.0);
    }

    #[test]
    fn zero_created_ignores_failed_count() {
        assert_eq!(error_rate_percent(0.0, 0.0), 0.0);
        assert_eq!(error_rate_percent(0.0, 7.0), 0.0);
    }

    #[test]
    fn error_rate_is_failed_over_created_times_hundred() {
        for (created, failed) in [(100.0, 5.0), (3.0, 1.0), (7.0, 7.0), (250.0, 0.0)] {
            assert_eq!(
                error_rate_percent(created, failed),
                failed / created * 100.0
            );
        }
    }

    #[test]
    fn missing_counters_default_to_zero() {
        let r = report(json!({
            "aggregate": {
                "summaries": {"http.response_time": {"p50": 1, "p90": 2, "p95": 3}},
                "counters": {},
                "rates": {"http.request_rate": 12}
            }
        }));
        let row = extract_http_metrics(&r).expect("missing counters must not fail");
        assert_eq!(row.error_rate_percent, 0.0);
        assert_eq!(row.throughput, 12.0);
    }

    #[test]
    fn missing_rate_defaults_to_zero() {
        let r = report(json!({
            "aggregate": {
                "summaries": {"socketio.response_time": {"p50": 1, "p90": 2, "p95": 3}},
                "counters": {"vusers.created": 10, "vusers.failed": 1},
                "rates": {}
            }
        }));
        let row = extract_ws_metrics(&r).expect("missing rate must not fail");
        assert_eq!(row.throughput, 0.0);
    }

    #[test]
    fn missing_http_summary_is_an_error() {
        let r = report(json!({
            "aggregate": {
                "summaries": {"socketio.response_time": {"p50": 1, "p90": 2, "p95": 3}},
                "counters": {},
                "rates": {}
            }
        }));
        let err = extract_http_metrics(&r).unwrap_err();
        assert!(matches!(err, BenchError::MissingSummary(ref m) if m == "http.response_time"));
    }

    #[test]
    fn missing_ws_summary_is_an_error() {
        let err = extract_ws_metrics(&baseline()).unwrap_err();
        assert!(matches!(err, BenchError::MissingSummary(ref m) if m == "socketio.response_time"));
    }

    #[test]
    fn protocol_labels_and_keys() {
        assert_eq!(Protocol::Http.label(), "HTTP (REST)");
        assert_eq!(Protocol::WebSocket.label(), "WebSocket");
        assert_eq!(Protocol::WebSocket.summary_key(), "socketio.response_time");
        assert_eq!(Protocol::Http.rate_key(), "http.request_rate");
        assert_eq!(Protocol::WebSocket.to_string(), "WebSocket");
    }

    #[test]
    fn protocol_serde_names() {
        assert_eq!(serde_json::to_string(&Protocol::Http).unwrap(), "\"http\"");
        assert_eq!(
            serde_json::to_string(&Protocol::WebSocket).unwrap(),
            "\"websocket\""
        );
    }
}
