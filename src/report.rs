use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::analyzers::grade::Pollutant;
use crate::analyzers::normalize::normalize;
use crate::analyzers::project::{aggregate_grades, summarize, table, time_series_if_any};
use crate::analyzers::types::{
    GradeCountAggregate, NormalizedRecord, PollutantSummary, RawStationRecord, TableRow,
    TimeSeries,
};
use crate::error::AirQualityError;

/// Per-pollutant datasets for the charts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PollutantReport {
    pub grades: GradeCountAggregate,
    pub summary: PollutantSummary,
    pub time_series: Option<TimeSeries>,
}

impl PollutantReport {
    fn from_records(records: &[NormalizedRecord], pollutant: Pollutant) -> Self {
        PollutantReport {
            grades: aggregate_grades(records, pollutant),
            summary: summarize(records, pollutant),
            time_series: time_series_if_any(records, pollutant),
        }
    }
}

/// Whole-batch failure as shown to the user. `body` is the upstream
/// response body, unmodified, when the API answered with one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportError {
    pub kind: String,
    pub status: Option<u16>,
    pub body: Option<String>,
    pub message: String,
}

impl From<&AirQualityError> for ReportError {
    fn from(err: &AirQualityError) -> Self {
        let body = match err {
            AirQualityError::UpstreamFetch { body, .. } => Some(body.clone()),
            AirQualityError::MalformedResponse(_) => None,
        };

        ReportError {
            kind: err.kind().to_string(),
            status: err.status(),
            body,
            message: err.to_string(),
        }
    }
}

/// Everything the display layer needs for one refresh.
///
/// A failed fetch yields no rows, empty aggregates, no series and `error` set;
/// an empty but successful batch has the same empty data with `error: None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirQualityReport {
    pub generated_at: DateTime<Utc>,
    pub region: Option<String>,
    pub record_count: usize,
    pub rows: Vec<TableRow>,
    pub pm10: PollutantReport,
    pub pm25: PollutantReport,
    pub error: Option<ReportError>,
}

impl AirQualityReport {
    pub fn from_records(raw: &[RawStationRecord]) -> Self {
        let records = normalize(raw);

        let unknown = records
            .iter()
            .filter(|r| r.value(Pollutant::Pm10).is_none() && r.value(Pollutant::Pm25).is_none())
            .count();
        if unknown > 0 {
            warn!(unknown, "Records without any usable PM reading");
        }

        AirQualityReport {
            generated_at: Utc::now(),
            region: None,
            record_count: records.len(),
            rows: table(&records),
            pm10: PollutantReport::from_records(&records, Pollutant::Pm10),
            pm25: PollutantReport::from_records(&records, Pollutant::Pm25),
            error: None,
        }
    }

    /// Create an empty report carrying the failure.
    pub fn from_error(err: &AirQualityError) -> Self {
        AirQualityReport {
            generated_at: Utc::now(),
            region: None,
            record_count: 0,
            rows: Vec::new(),
            pm10: PollutantReport::default(),
            pm25: PollutantReport::default(),
            error: Some(err.into()),
        }
    }

    pub fn from_outcome(outcome: Result<Vec<RawStationRecord>, AirQualityError>) -> Self {
        match outcome {
            Ok(raw) => {
                let report = Self::from_records(&raw);
                info!(records = report.record_count, "Report built");
                report
            }
            Err(err) => {
                warn!(error = %err, "Report built from failed fetch");
                Self::from_error(&err)
            }
        }
    }

    pub fn with_region(mut self, region: &str) -> Self {
        self.region = Some(region.to_string());
        self
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }

    pub fn pollutant(&self, pollutant: Pollutant) -> &PollutantReport {
        match pollutant {
            Pollutant::Pm10 => &self.pm10,
            Pollutant::Pm25 => &self.pm25,
        }
    }
}
