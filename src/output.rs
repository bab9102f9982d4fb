//! Output formatting and persistence for air-quality reports.
//!
//! Supports pretty-printing, JSON serialization, and CSV append.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::analyzers::grade::{Grade, Pollutant};
use crate::report::AirQualityReport;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// Flat CSV row: one station reading from one report.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    generated_at: DateTime<Utc>,
    region: Option<&'a str>,
    station_name: &'a str,
    pm10_value: Option<f64>,
    pm10_grade: Grade,
    pm25_value: Option<f64>,
    pm25_grade: Grade,
}

/// Logs the report using Rust's debug pretty-print format.
pub fn print_pretty(report: &AirQualityReport) {
    debug!("{:#?}", report);
}

/// Logs one line per pollutant with its grade distribution.
pub fn log_summary(report: &AirQualityReport) {
    if let Some(err) = &report.error {
        info!(kind = %err.kind, status = ?err.status, "{}", err.message);
        return;
    }

    for pollutant in Pollutant::ALL {
        let section = report.pollutant(pollutant);
        let grades = section
            .grades
            .iter()
            .map(|(grade, count)| format!("{grade}={count}"))
            .collect::<Vec<_>>()
            .join(" ");
        info!(
            pollutant = %pollutant,
            present = section.summary.present,
            mean = ?section.summary.mean,
            max = ?section.summary.max,
            grades = %grades,
            "Grade distribution"
        );
    }
}

pub fn to_json(report: &AirQualityReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Writes the report as pretty-printed JSON, replacing any existing file.
pub fn write_json(path: &str, report: &AirQualityReport) -> Result<()> {
    std::fs::write(path, to_json(report)?)?;
    debug!(path, "JSON report written");
    Ok(())
}

/// Appends the report's table rows to a CSV file.
///
/// Creates the file with headers if it does not already exist. A failed
/// report has no rows and leaves the file untouched.
pub fn append_rows(path: &str, report: &AirQualityReport) -> Result<usize> {
    if report.rows.is_empty() {
        return Ok(0);
    }

    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, rows = report.rows.len(), "Appending CSV rows");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    for row in &report.rows {
        writer.serialize(CsvRow {
            generated_at: report.generated_at,
            region: report.region.as_deref(),
            station_name: &row.station_name,
            pm10_value: row.pm10_value,
            pm10_grade: row.pm10_grade,
            pm25_value: row.pm25_value,
            pm25_grade: row.pm25_grade,
        })?;
    }
    writer.flush()?;

    Ok(report.rows.len())
}
