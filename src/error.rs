//! Error types for the grading pipeline.
//!
//! Whole-batch failures ([`AirQualityError`]) abort a report; per-field
//! failures ([`ValueParseError`], [`TimestampParseError`]) are recovered
//! during normalization and only recorded on the affected record.

use serde::Serialize;
use thiserror::Error;

/// A failure that leaves the whole batch without data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AirQualityError {
    /// The API call failed, reported a non-success result code, or returned
    /// no usable `items` list. The body is kept verbatim for display.
    #[error("API request failed ({}): {body}", describe_status(*status))]
    UpstreamFetch { status: Option<u16>, body: String },

    /// The response body could not be decoded as JSON at all.
    #[error("Response data is not in the expected format: {0}")]
    MalformedResponse(String),
}

fn describe_status(status: Option<u16>) -> String {
    match status {
        Some(code) => format!("status {code}"),
        None => "no response".to_string(),
    }
}

impl AirQualityError {
    /// Short machine-readable name, used in JSON and CSV output.
    pub fn kind(&self) -> &'static str {
        match self {
            AirQualityError::UpstreamFetch { .. } => "upstream_fetch",
            AirQualityError::MalformedResponse(_) => "malformed_response",
        }
    }

    /// HTTP status of the failed call, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            AirQualityError::UpstreamFetch { status, .. } => *status,
            AirQualityError::MalformedResponse(_) => None,
        }
    }
}

impl From<reqwest::Error> for AirQualityError {
    fn from(err: reqwest::Error) -> Self {
        AirQualityError::UpstreamFetch {
            status: err.status().map(|s| s.as_u16()),
            body: err.to_string(),
        }
    }
}

/// Why a PM10 / PM2.5 field produced no value.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "reason", content = "text", rename_all = "snake_case")]
pub enum ValueParseError {
    /// The field was absent, null, or blank.
    #[error("value is missing")]
    Missing,
    /// The field held text that is not a finite number (e.g. `-`).
    #[error("value {0:?} is not numeric")]
    NotNumeric(String),
}

/// Why a record has no usable `dataTime`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "reason", content = "text", rename_all = "snake_case")]
pub enum TimestampParseError {
    #[error("timestamp is missing")]
    Missing,
    #[error("timestamp {0:?} does not match YYYY-MM-DD HH:MM")]
    BadFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_message_includes_status_and_body() {
        let err = AirQualityError::UpstreamFetch {
            status: Some(500),
            body: "Internal Server Error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API request failed (status 500): Internal Server Error"
        );
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.kind(), "upstream_fetch");
    }

    #[test]
    fn test_upstream_message_without_response() {
        let err = AirQualityError::UpstreamFetch {
            status: None,
            body: "connection refused".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API request failed (no response): connection refused"
        );
    }

    #[test]
    fn test_malformed_has_no_status() {
        let err = AirQualityError::MalformedResponse("expected value".to_string());
        assert_eq!(err.status(), None);
        assert_eq!(err.kind(), "malformed_response");
    }
}
