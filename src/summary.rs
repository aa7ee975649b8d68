//! Best-effort decoding of the JSON `summary` attached to a scan.
//!
//! The producer writes the summary; nothing guarantees it is well formed, so
//! every failure here is reported and never propagated.

use crate::sqlite::Value;
use serde_json::{Map, Value as Json};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("invalid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),
    #[error("expected JSON text, found a {0} cell")]
    NotText(&'static str),
}

/// Result of decoding a present summary cell
#[derive(Debug)]
pub enum SummaryOutcome {
    Parsed(Map<String, Json>),
    Failed(SummaryError),
}

impl SummaryOutcome {
    /// Top-level keys, in document order
    pub fn keys(&self) -> Vec<&str> {
        match self {
            SummaryOutcome::Parsed(map) => map.keys().map(String::as_str).collect(),
            SummaryOutcome::Failed(_) => Vec::new(),
        }
    }
}

/// Decode the summary cell. Returns `None` when there is nothing to decode.
pub fn parse_summary(cell: &Value) -> Option<SummaryOutcome> {
    if !cell.is_present() {
        return None;
    }
    let outcome = match decode_object(cell) {
        Ok(map) => SummaryOutcome::Parsed(map),
        Err(e) => {
            tracing::warn!("summary could not be decoded: {e}");
            SummaryOutcome::Failed(e)
        }
    };
    Some(outcome)
}

fn decode_object(cell: &Value) -> Result<Map<String, Json>, SummaryError> {
    let json: Json = match cell {
        Value::Text(text) => serde_json::from_str(text)?,
        Value::Blob(bytes) => serde_json::from_slice(bytes)?,
        other => return Err(SummaryError::NotText(other.kind())),
    };
    match json {
        Json::Object(map) => Ok(map),
        Json::Null => Err(SummaryError::NotAnObject("null")),
        Json::Bool(_) => Err(SummaryError::NotAnObject("a boolean")),
        Json::Number(_) => Err(SummaryError::NotAnObject("a number")),
        Json::String(_) => Err(SummaryError::NotAnObject("a string")),
        Json::Array(_) => Err(SummaryError::NotAnObject("an array")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_keys_keep_document_order() {
        let cell = Value::from(r#"{"zeta":1,"alpha":{"nested":true},"mid":[1,2]}"#);
        let outcome = parse_summary(&cell).unwrap();
        assert_eq!(outcome.keys(), vec!["zeta", "alpha", "mid"]);
        match outcome {
            SummaryOutcome::Parsed(map) => assert_eq!(map["alpha"], json!({"nested": true})),
            SummaryOutcome::Failed(e) => panic!("unexpected failure: {e}"),
        }
    }

    #[test]
    fn absent_or_empty_summary_is_skipped() {
        assert!(parse_summary(&Value::Null).is_none());
        assert!(parse_summary(&Value::Text(String::new())).is_none());
        assert!(parse_summary(&Value::Blob(Vec::new())).is_none());
    }

    #[test]
    fn malformed_text_is_reported_not_raised() {
        let outcome = parse_summary(&Value::from("{not json")).unwrap();
        assert!(outcome.keys().is_empty());
        match outcome {
            SummaryOutcome::Failed(SummaryError::Malformed(e)) => assert!(e.is_syntax()),
            other => panic!("expected a syntax error, got {other:?}"),
        }
    }

    #[test]
    fn non_object_json_is_a_failure() {
        let outcome = parse_summary(&Value::from("[1,2,3]")).unwrap();
        match outcome {
            SummaryOutcome::Failed(e) => {
                assert_eq!(e.to_string(), "expected a JSON object, found an array")
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn blob_summary_is_decoded_as_utf8_json() {
        let outcome = parse_summary(&Value::Blob(br#"{"k":"v"}"#.to_vec())).unwrap();
        assert_eq!(outcome.keys(), vec!["k"]);
    }

    #[test]
    fn numeric_cell_cannot_hold_a_summary() {
        let outcome = parse_summary(&Value::Integer(12)).unwrap();
        match outcome {
            SummaryOutcome::Failed(SummaryError::NotText(kind)) => assert_eq!(kind, "integer"),
            other => panic!("expected NotText, got {other:?}"),
        }
    }
}
