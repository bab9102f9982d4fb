//! Data types used by the grading pipeline.

use crate::analyzers::grade::{Grade, Pollutant};
use crate::error::{TimestampParseError, ValueParseError};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A single station entry as delivered by the measurement API.
///
/// Every field is kept as text. JSON `null` fields are dropped, so they read
/// the same as missing ones; JSON numbers keep their decimal text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "HashMap<String, serde_json::Value>")]
pub struct RawStationRecord {
    fields: HashMap<String, String>,
}

impl RawStationRecord {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<HashMap<String, serde_json::Value>> for RawStationRecord {
    fn from(map: HashMap<String, serde_json::Value>) -> Self {
        let fields = map
            .into_iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    serde_json::Value::Null => return None,
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                Some((key, text))
            })
            .collect();
        Self { fields }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawStationRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A field of a raw record that could not be used as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "field", rename_all = "snake_case")]
pub enum FieldIssue {
    Value {
        pollutant: Pollutant,
        error: ValueParseError,
    },
    Timestamp {
        error: TimestampParseError,
    },
}

/// Typed, graded view of one [`RawStationRecord`]. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    pub(crate) station_name: String,
    pub(crate) pm10: Option<f64>,
    pub(crate) pm25: Option<f64>,
    pub(crate) pm10_grade: Grade,
    pub(crate) pm25_grade: Grade,
    pub(crate) timestamp: Option<NaiveDateTime>,
    pub(crate) issues: Vec<FieldIssue>,
}

impl NormalizedRecord {
    pub fn station_name(&self) -> &str {
        &self.station_name
    }

    pub fn value(&self, pollutant: Pollutant) -> Option<f64> {
        match pollutant {
            Pollutant::Pm10 => self.pm10,
            Pollutant::Pm25 => self.pm25,
        }
    }

    pub fn grade(&self, pollutant: Pollutant) -> Grade {
        match pollutant {
            Pollutant::Pm10 => self.pm10_grade,
            Pollutant::Pm25 => self.pm25_grade,
        }
    }

    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        self.timestamp
    }

    /// Fields that degraded during normalization. Distinguishes a missing
    /// sensor value from one that was present but unreadable.
    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }
}

/// One row of the tabular projection handed to the display layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub station_name: String,
    pub pm10_value: Option<f64>,
    pub pm10_grade: Grade,
    pub pm25_value: Option<f64>,
    pub pm25_grade: Grade,
}

/// Count of records per grade for one pollutant. Grades that no record
/// carries are absent rather than zero.
pub type GradeCountAggregate = BTreeMap<Grade, usize>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    pub timestamp: NaiveDateTime,
    pub value: Option<f64>,
}

/// Timestamp-ordered readings of one pollutant. Gaps keep `value: None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    pub pollutant: Pollutant,
    pub points: Vec<TimeSeriesPoint>,
}

impl TimeSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Descriptive statistics over the present values of one pollutant.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PollutantSummary {
    pub present: usize,
    pub absent: usize,
    pub mean: Option<f64>,
    pub stddev: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_record_from_json_drops_nulls() {
        let raw: RawStationRecord = serde_json::from_str(
            r#"{"stationName":"Jongno","pm10Value":null,"pm25Value":12,"sidoName":"서울"}"#,
        )
        .unwrap();

        assert_eq!(raw.get("stationName"), Some("Jongno"));
        assert_eq!(raw.get("pm10Value"), None);
        assert_eq!(raw.get("pm25Value"), Some("12"));
        assert_eq!(raw.len(), 3);
    }

    #[test]
    fn test_raw_record_rejects_non_object() {
        let result: Result<RawStationRecord, _> = serde_json::from_str("[1, 2]");
        assert!(result.is_err());
    }

    #[test]
    fn test_raw_record_from_pairs() {
        let raw: RawStationRecord = [("stationName", "Busan"), ("pm10Value", "")]
            .into_iter()
            .collect();
        assert_eq!(raw.get("pm10Value"), Some(""));
        assert!(!raw.is_empty());
    }
}
