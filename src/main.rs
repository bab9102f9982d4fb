//! CLI entry point for the air-quality rater.
//!
//! Fetches real-time PM10 / PM2.5 readings for a region, grades every
//! station, and prints the resulting report as JSON or CSV.

use air_quality_rater::{
    config::ApiConfig,
    output::{append_rows, log_summary, print_pretty, to_json, write_json},
    parser::parse_response,
    report::AirQualityReport,
    services::{AirKoreaClient, MeasurementApi, Sido},
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "air_quality_rater")]
#[command(about = "Grade regional air-quality readings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch live readings for a region and report their grades
    Report {
        /// Region to query
        #[arg(short, long, value_enum)]
        region: Sido,

        /// Write the JSON report to this file instead of stdout
        #[arg(long)]
        json: Option<String>,

        /// CSV file to append table rows to
        #[arg(long)]
        csv: Option<String>,
    },
    /// Grade a saved API response body
    Analyze {
        /// Path to a JSON response saved from the API
        #[arg(value_name = "FILE")]
        source: String,

        /// Write the JSON report to this file instead of stdout
        #[arg(long)]
        json: Option<String>,

        /// CSV file to append table rows to
        #[arg(long)]
        csv: Option<String>,
    },
    /// List supported regions
    Regions,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/air_quality_rater.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("air_quality_rater.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report { region, json, csv } => {
            let config = ApiConfig::from_env()?;
            let client = AirKoreaClient::from_config(&config)?;

            info!(region = %region, "Fetching measurements");
            let outcome = client.fetch_region(region).await;
            let report = AirQualityReport::from_outcome(outcome).with_region(region.api_name());

            emit(&report, json.as_deref(), csv.as_deref())?;
        }
        Commands::Analyze { source, json, csv } => {
            let body = std::fs::read_to_string(&source)
                .with_context(|| format!("Failed to read {source}"))?;
            let report = AirQualityReport::from_outcome(parse_response(200, &body));

            emit(&report, json.as_deref(), csv.as_deref())?;
        }
        Commands::Regions => {
            for sido in Sido::value_variants() {
                println!("{sido:<8} {}", sido.api_name());
            }
        }
    }

    Ok(())
}

/// Writes the report to the requested sinks. A failed report is still
/// written, then turned into a non-zero exit.
fn emit(report: &AirQualityReport, json: Option<&str>, csv: Option<&str>) -> Result<()> {
    print_pretty(report);
    log_summary(report);

    match json {
        Some(path) => {
            write_json(path, report)?;
            info!(path, "Report written");
        }
        None => println!("{}", to_json(report)?),
    }

    if let Some(path) = csv {
        let rows = append_rows(path, report)?;
        info!(path, rows, "Rows appended");
    }

    if let Some(err) = &report.error {
        warn!(kind = %err.kind, status = ?err.status, "Report has no data");
        anyhow::bail!("{}", err.message);
    }

    Ok(())
}
