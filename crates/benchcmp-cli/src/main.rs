mod cli;

use std::process::ExitCode;

use benchcmp_core::chart::{ensure_svg_path, render_latency_chart};
use benchcmp_core::compare::{check_reports, compare_reports};
use benchcmp_core::table::export::{export_csv, export_json, export_markdown};
use benchcmp_core::thresholds::{load_thresholds, Thresholds};
use benchcmp_core::BenchError;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{CheckArgs, Cli, Commands, CompareArgs, OutputFormat, SummaryArgs};

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries the table.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "benchcmp=info,benchcmp_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Compare(CompareArgs::defaults()));

    let result = match command {
        Commands::Compare(args) => run_compare(args).await,
        Commands::Check(args) => run_check(args).await,
        Commands::Summary(args) => run_summary(args).await,
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run_compare(args: CompareArgs) -> Result<ExitCode, BenchError> {
    // Reject a bad chart path before anything reaches stdout.
    if !args.no_chart {
        ensure_svg_path(&args.chart)?;
    }
    let table = compare_reports(&args.reports.http, &args.reports.ws).await?;

    let rendered = match args.format {
        OutputFormat::Text => table.render_text(),
        OutputFormat::Markdown => export_markdown(&table, chrono::Utc::now()),
        OutputFormat::Csv => export_csv(&table)?,
        OutputFormat::Json => export_json(&table)? + "\n",
    };
    print!("{rendered}");

    if !args.no_chart {
        render_latency_chart(&table, &args.chart)?;
    }
    Ok(ExitCode::SUCCESS)
}

async fn run_check(args: CheckArgs) -> Result<ExitCode, BenchError> {
    let thresholds = match &args.thresholds {
        Some(path) => load_thresholds(path).await?,
        None => Thresholds::default(),
    };

    let report = check_reports(
        &args.baseline,
        &args.current,
        args.protocol.into(),
        &thresholds,
    )
    .await?;

    if report.is_regression() {
        eprintln!("Regression detected in {}:", args.current.display());
        for violation in &report.violations {
            eprintln!("  - {violation}");
        }
        eprintln!(
            "\n{} performance regression(s) detected.",
            report.violations.len()
        );
        return Ok(ExitCode::FAILURE);
    }

    println!("No performance regressions detected.");
    Ok(ExitCode::SUCCESS)
}

async fn run_summary(args: SummaryArgs) -> Result<ExitCode, BenchError> {
    let table = compare_reports(&args.reports.http, &args.reports.ws).await?;
    let markdown = export_markdown(&table, chrono::Utc::now());

    match &args.output {
        Some(path) => {
            tokio::fs::write(path, markdown).await?;
            info!(path = %path.display(), "benchmark summary written");
        }
        None => print!("{markdown}"),
    }
    Ok(ExitCode::SUCCESS)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
