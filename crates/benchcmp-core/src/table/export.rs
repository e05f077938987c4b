use chrono::{DateTime, SecondsFormat, Utc};

use super::{ComparisonTable, COLUMNS};
use crate::error::BenchError;

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

/// Export the table as CSV: a header row followed by one record per row.
pub fn export_csv(table: &ComparisonTable) -> Result<String, BenchError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(COLUMNS)?;
    for row in table.rows() {
        let mut record = vec![row.protocol.clone()];
        record.extend(row.values().iter().map(|v| v.to_string()));
        writer.write_record(&record)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| BenchError::Io(std::io::Error::new(e.error().kind(), e.to_string())))?;
    String::from_utf8(bytes).map_err(|e| BenchError::Validation(e.to_string()))
}

// ---------------------------------------------------------------------------
// JSON export
// ---------------------------------------------------------------------------

/// Export the table as a pretty-printed JSON array of rows.
pub fn export_json(table: &ComparisonTable) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(table)
}

// ---------------------------------------------------------------------------
// Markdown export
// ---------------------------------------------------------------------------

/// Export the table as a markdown benchmark summary.
pub fn export_markdown(table: &ComparisonTable, generated_at: DateTime<Utc>) -> String {
    let mut out = String::from("# Benchmark Summary\n\n");
    out.push_str("## Protocol Comparison\n\n");

    out.push_str("| ");
    out.push_str(&COLUMNS.join(" | "));
    out.push_str(" |\n");

    out.push('|');
    for column in COLUMNS {
        out.push_str(&"-".repeat(column.len() + 2));
        out.push('|');
    }
    out.push('\n');

    for row in table.rows() {
        let (p50, p90, p95, error_rate, throughput) = row.metrics.as_tuple();
        out.push_str(&format!(
            "| {} | {:.2} | {:.2} | {:.2} | {:.2}% | {:.2} |\n",
            md_escape(&row.protocol),
            p50,
            p90,
            p95,
            error_rate,
            throughput,
        ));
    }

    out.push_str(&format!(
        "\n_Generated {}_\n",
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    ));
    out
}

fn md_escape(s: &str) -> String {
    s.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricsRow;
    use chrono::TimeZone;

    fn sample() -> ComparisonTable {
        ComparisonTable::new(
            MetricsRow {
                p50: 10.0,
                p90: 20.0,
                p95: 25.0,
                error_rate_percent: 5.0,
                throughput: 50.0,
            },
            MetricsRow {
                p50: 3.5,
                p90: 7.25,
                p95: 9.0,
                error_rate_percent: 0.0,
                throughput: 120.0,
            },
        )
    }

    // -----------------------------------------------------------------------
    // CSV
    // -----------------------------------------------------------------------

    #[test]
    fn export_csv_has_header_and_rows() {
        let csv = export_csv(&sample()).expect("csv export should succeed");
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "Protocol,p50,p90,p95,Error Rate (%),Throughput (req/s)"
        );
        assert_eq!(lines[1], "HTTP (REST),10,20,25,5,50");
        assert_eq!(lines[2], "WebSocket,3.5,7.25,9,0,120");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn export_csv_quotes_labels_with_commas() {
        let table = ComparisonTable::from_rows([("gRPC, unary", sample().rows()[0].metrics)]);
        let csv = export_csv(&table).expect("csv export should succeed");
        assert!(csv.contains("\"gRPC, unary\""));
    }

    // -----------------------------------------------------------------------
    // JSON
    // -----------------------------------------------------------------------

    #[test]
    fn export_json_is_array_of_flat_rows() {
        let json_str = export_json(&sample()).expect("json export should succeed");
        let parsed: serde_json::Value =
            serde_json::from_str(&json_str).expect("output should be valid JSON");
        let rows = parsed.as_array().expect("top level should be an array");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["protocol"], "HTTP (REST)");
        assert_eq!(rows[0]["p95"], 25.0);
        assert_eq!(rows[1]["throughput"], 120.0);
        assert_eq!(rows[0]["error_rate_percent"], 5.0);
    }

    #[test]
    fn export_json_reads_back() {
        let table = sample();
        let json_str = export_json(&table).expect("json export should succeed");
        let back: ComparisonTable = serde_json::from_str(&json_str).expect("should parse");
        assert_eq!(back, table);
    }

    // -----------------------------------------------------------------------
    // Markdown
    // -----------------------------------------------------------------------

    #[test]
    fn export_markdown_contains_table() {
        let at = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
        let md = export_markdown(&sample(), at);
        assert!(md.starts_with("# Benchmark Summary"));
        assert!(md.contains("| Protocol | p50 | p90 | p95 | Error Rate (%) | Throughput (req/s) |"));
        assert!(md.contains("| HTTP (REST) | 10.00 | 20.00 | 25.00 | 5.00% | 50.00 |"));
        assert!(md.contains("| WebSocket | 3.50 | 7.25 | 9.00 | 0.00% | 120.00 |"));
        assert!(md.contains("_Generated 2026-10-16T12:00:00Z_"));
    }

    #[test]
    fn export_markdown_separator_matches_column_count() {
        let md = export_markdown(&sample(), Utc::now());
        let separator = md
            .lines()
            .find(|l| l.starts_with("|-"))
            .expect("separator row present");
        assert_eq!(separator.matches('|').count(), COLUMNS.len() + 1);
    }

    #[test]
    fn md_escape_pipes() {
        assert_eq!(md_escape("a|b"), "a\\|b");
        assert_eq!(md_escape("plain"), "plain");
    }
}
