//! Projections of normalized records for display: table rows, grade counts,
//! time series and summary statistics.

use crate::analyzers::grade::Pollutant;
use crate::analyzers::types::{
    GradeCountAggregate, NormalizedRecord, PollutantSummary, TableRow, TimeSeries,
    TimeSeriesPoint,
};
use crate::analyzers::utility::{mean, min_max, stddev};

/// One row per record, in input order.
pub fn table(records: &[NormalizedRecord]) -> Vec<TableRow> {
    records
        .iter()
        .map(|r| TableRow {
            station_name: r.station_name.clone(),
            pm10_value: r.pm10,
            pm10_grade: r.pm10_grade,
            pm25_value: r.pm25,
            pm25_grade: r.pm25_grade,
        })
        .collect()
}

/// Counts records per grade. Grades that do not occur are left out, so the
/// counts always sum to `records.len()`.
pub fn aggregate_grades(records: &[NormalizedRecord], pollutant: Pollutant) -> GradeCountAggregate {
    let mut counts = GradeCountAggregate::new();
    for record in records {
        *counts.entry(record.grade(pollutant)).or_default() += 1;
    }
    counts
}

/// Builds the series for `pollutant` from records with a timestamp, oldest
/// first. Records sharing a timestamp keep their input order.
pub fn build_time_series(records: &[NormalizedRecord], pollutant: Pollutant) -> TimeSeries {
    let mut points: Vec<TimeSeriesPoint> = records
        .iter()
        .filter_map(|r| {
            r.timestamp.map(|timestamp| TimeSeriesPoint {
                timestamp,
                value: r.value(pollutant),
            })
        })
        .collect();

    points.sort_by_key(|p| p.timestamp);

    TimeSeries { pollutant, points }
}

/// Like [`build_time_series`], but `None` when no record carries a timestamp.
pub fn time_series_if_any(records: &[NormalizedRecord], pollutant: Pollutant) -> Option<TimeSeries> {
    if records.iter().any(|r| r.timestamp.is_some()) {
        Some(build_time_series(records, pollutant))
    } else {
        None
    }
}

pub fn summarize(records: &[NormalizedRecord], pollutant: Pollutant) -> PollutantSummary {
    let values: Vec<f64> = records.iter().filter_map(|r| r.value(pollutant)).collect();

    let avg = mean(&values);
    let bounds = min_max(&values);

    PollutantSummary {
        present: values.len(),
        absent: records.len() - values.len(),
        mean: avg,
        stddev: avg.and_then(|m| stddev(&values, m)),
        min: bounds.map(|(lo, _)| lo),
        max: bounds.map(|(_, hi)| hi),
    }
}
