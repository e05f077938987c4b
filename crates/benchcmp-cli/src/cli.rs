use std::path::PathBuf;

use benchcmp_core::compare::{DEFAULT_HTTP_REPORT, DEFAULT_WS_REPORT};
use benchcmp_core::Protocol;
use clap::{Args, Parser, Subcommand, ValueEnum};

pub const DEFAULT_CHART: &str = "latency-comparison.svg";

#[derive(Debug, Parser)]
#[command(name = "benchcmp", version)]
#[command(about = "Compare HTTP and WebSocket Artillery benchmark reports", long_about = None)]
pub struct Cli {
    /// Defaults to `compare` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the comparison table and render the latency chart.
    Compare(CompareArgs),
    /// Check a report against a baseline; exits with 1 on regression.
    Check(CheckArgs),
    /// Write a markdown summary of the comparison.
    Summary(SummaryArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ReportPaths {
    /// Artillery report of the HTTP test.
    #[arg(long, env = "BENCHCMP_HTTP_REPORT", default_value = DEFAULT_HTTP_REPORT)]
    pub http: PathBuf,
    /// Artillery report of the WebSocket test.
    #[arg(long, env = "BENCHCMP_WS_REPORT", default_value = DEFAULT_WS_REPORT)]
    pub ws: PathBuf,
}

#[derive(Debug, Clone, Parser)]
pub struct CompareArgs {
    #[command(flatten)]
    pub reports: ReportPaths,
    /// Where to write the SVG chart.
    #[arg(long, default_value = DEFAULT_CHART)]
    pub chart: PathBuf,
    #[arg(long)]
    pub no_chart: bool,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl CompareArgs {
    /// Arguments for a bare `benchcmp` invocation; environment overrides
    /// still apply.
    pub fn defaults() -> Self {
        Self::parse_from(["benchcmp"])
    }
}

#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    #[arg(long)]
    pub baseline: PathBuf,
    #[arg(long)]
    pub current: PathBuf,
    #[arg(short, long, value_enum, default_value_t = ProtocolArg::Http)]
    pub protocol: ProtocolArg,
    /// JSON file of per-metric thresholds; built-in defaults when omitted.
    #[arg(long)]
    pub thresholds: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub reports: ReportPaths,
    /// Markdown destination; stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Markdown,
    Csv,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProtocolArg {
    Http,
    Websocket,
}

impl From<ProtocolArg> for Protocol {
    fn from(value: ProtocolArg) -> Self {
        match value {
            ProtocolArg::Http => Protocol::Http,
            ProtocolArg::Websocket => Protocol::WebSocket,
        }
    }
}
