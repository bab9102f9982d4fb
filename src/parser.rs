//! Decoder for the AirKorea real-time measurement response envelope.
//!
//! A successful response looks like:
//! ```json
//! {"response": {
//!     "header": {"resultCode": "00", "resultMsg": "NORMAL_CODE"},
//!     "body": {"totalCount": 40, "items": [ { "stationName": "...", ... } ]}
//! }}
//! ```

use crate::analyzers::types::RawStationRecord;
use crate::error::AirQualityError;
use serde_json::Value;
use tracing::{debug, warn};

/// Result code the API uses for a normal response.
pub const RESULT_OK: &str = "00";

/// Turns an HTTP status and body into the raw station records.
///
/// # Errors
///
/// - [`AirQualityError::UpstreamFetch`] for a non-2xx status, an API result
///   code other than [`RESULT_OK`], or a body without an `items` list.
/// - [`AirQualityError::MalformedResponse`] if the body is not JSON (the API
///   answers some failures with XML) or an item is not an object.
///
/// An empty `items` list is a successful, empty batch.
pub fn parse_response(status: u16, body: &str) -> Result<Vec<RawStationRecord>, AirQualityError> {
    if !(200..300).contains(&status) {
        warn!(status, "Measurement API returned non-success status");
        return Err(upstream(status, body));
    }

    let json: Value = serde_json::from_str(body)
        .map_err(|e| AirQualityError::MalformedResponse(e.to_string()))?;

    if let Some(code) = json
        .pointer("/response/header/resultCode")
        .and_then(Value::as_str)
    {
        if code != RESULT_OK {
            warn!(result_code = code, "Measurement API reported an error result");
            return Err(upstream(status, body));
        }
    }

    let Some(items) = json.pointer("/response/body/items").and_then(Value::as_array) else {
        warn!("Measurement API response has no items list");
        return Err(upstream(status, body));
    };

    let records = items
        .iter()
        .map(|item| {
            serde_json::from_value::<RawStationRecord>(item.clone())
                .map_err(|e| AirQualityError::MalformedResponse(format!("invalid item: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(items = records.len(), "Measurement response decoded");
    Ok(records)
}

fn upstream(status: u16, body: &str) -> AirQualityError {
    AirQualityError::UpstreamFetch {
        status: Some(status),
        body: body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(code: &str, items: &str) -> String {
        format!(
            r#"{{"response":{{"header":{{"resultCode":"{code}","resultMsg":"msg"}},"body":{{"totalCount":0,"items":{items},"pageNo":1,"numOfRows":100}}}}}}"#
        )
    }

    #[test]
    fn test_server_error_is_upstream() {
        let err = parse_response(500, "Internal Server Error").unwrap_err();
        assert_eq!(
            err,
            AirQualityError::UpstreamFetch {
                status: Some(500),
                body: "Internal Server Error".to_string(),
            }
        );
    }

    #[test]
    fn test_xml_body_is_malformed() {
        let body = "<OpenAPI_ServiceResponse><cmmMsgHeader><errMsg>SERVICE ERROR</errMsg></cmmMsgHeader></OpenAPI_ServiceResponse>";
        let err = parse_response(200, body).unwrap_err();
        assert!(matches!(err, AirQualityError::MalformedResponse(_)));
    }

    #[test]
    fn test_result_code_error_is_upstream() {
        let body = envelope("30", "[]");
        let err = parse_response(200, &body).unwrap_err();
        assert_eq!(err.status(), Some(200));
        assert!(matches!(err, AirQualityError::UpstreamFetch { .. }));
    }

    #[test]
    fn test_missing_items_is_upstream() {
        let err = parse_response(200, r#"{"response":{"body":{}}}"#).unwrap_err();
        assert!(matches!(err, AirQualityError::UpstreamFetch { .. }));
    }

    #[test]
    fn test_empty_items_is_success() {
        let records = parse_response(200, &envelope("00", "[]")).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_items_decoded_in_order() {
        let items = r#"[
            {"stationName":"Jongno","pm10Value":"25","pm25Value":"40","dataTime":"2024-05-01 09:00"},
            {"stationName":"Jung-gu","pm10Value":null,"pm25Value":"-","dataTime":"2024-05-01 09:00"}
        ]"#;
        let records = parse_response(200, &envelope("00", items)).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("stationName"), Some("Jongno"));
        assert_eq!(records[1].get("pm10Value"), None);
        assert_eq!(records[1].get("pm25Value"), Some("-"));
    }

    #[test]
    fn test_non_object_item_is_malformed() {
        let err = parse_response(200, &envelope("00", "[1]")).unwrap_err();
        assert!(matches!(err, AirQualityError::MalformedResponse(_)));
    }
}
