//! Converts raw station records into typed, graded records.

use crate::analyzers::grade::{Pollutant, classify};
use crate::analyzers::types::{FieldIssue, NormalizedRecord, RawStationRecord};
use crate::error::{TimestampParseError, ValueParseError};
use chrono::NaiveDateTime;
use tracing::debug;

pub const STATION_NAME_FIELD: &str = "stationName";
pub const DATA_TIME_FIELD: &str = "dataTime";

/// Format of `dataTime`, e.g. `2024-05-01 09:00`.
pub const DATA_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Normalizes a batch, one output record per input record, in input order.
///
/// Unparseable fields never fail the batch: they become absent values and are
/// listed in [`NormalizedRecord::issues`].
pub fn normalize(raw: &[RawStationRecord]) -> Vec<NormalizedRecord> {
    let records: Vec<NormalizedRecord> = raw.iter().map(normalize_record).collect();

    let degraded = records.iter().filter(|r| !r.issues.is_empty()).count();
    debug!(records = records.len(), degraded, "Batch normalized");

    records
}

pub fn normalize_record(raw: &RawStationRecord) -> NormalizedRecord {
    let mut issues = Vec::new();

    let mut read_value = |pollutant: Pollutant| match parse_value(raw.get(pollutant.field_name()))
    {
        Ok(v) => Some(v),
        Err(error) => {
            issues.push(FieldIssue::Value { pollutant, error });
            None
        }
    };

    let pm10 = read_value(Pollutant::Pm10);
    let pm25 = read_value(Pollutant::Pm25);

    let timestamp = match parse_timestamp(raw.get(DATA_TIME_FIELD)) {
        Ok(ts) => Some(ts),
        Err(error) => {
            issues.push(FieldIssue::Timestamp { error });
            None
        }
    };

    NormalizedRecord {
        station_name: raw.get(STATION_NAME_FIELD).unwrap_or_default().to_string(),
        pm10,
        pm25,
        pm10_grade: classify(pm10, Pollutant::Pm10),
        pm25_grade: classify(pm25, Pollutant::Pm25),
        timestamp,
        issues,
    }
}

/// Parses a concentration. Blank input is `Missing`; anything that is not a
/// finite number (including the API's `-` placeholder) is `NotNumeric`.
pub fn parse_value(raw: Option<&str>) -> Result<f64, ValueParseError> {
    let text = raw.map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(ValueParseError::Missing);
    }

    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ValueParseError::NotNumeric(text.to_string())),
    }
}

/// Parses `dataTime` with [`DATA_TIME_FORMAT`]. Hours outside `00..=23`,
/// including the API's end-of-day `24:00`, are rejected.
pub fn parse_timestamp(raw: Option<&str>) -> Result<NaiveDateTime, TimestampParseError> {
    let text = raw.map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(TimestampParseError::Missing);
    }

    NaiveDateTime::parse_from_str(text, DATA_TIME_FORMAT)
        .map_err(|_| TimestampParseError::BadFormat(text.to_string()))
}
