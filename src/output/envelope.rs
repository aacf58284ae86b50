//! JSON envelope types for CLI output.
//!
//! Every JSON document the CLI prints is wrapped in an envelope, so a
//! frontend can tell results from errors without parsing stderr.

use crate::constants::envelope::SPEC_VERSION;
use crate::error::{Error, ErrorKind};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// JSON envelope wrapping all CLI output events.
#[derive(Debug, Serialize)]
pub struct JsonEnvelope<T> {
    /// Envelope layout version.
    pub spec_version: &'static str,
    /// Event timestamp.
    pub timestamp: DateTime<Utc>,
    /// Event type.
    pub event: EventType,
    /// Event-specific payload.
    pub payload: T,
}

impl<T: Serialize> JsonEnvelope<T> {
    /// Create a new envelope with the current timestamp.
    pub fn new(event: EventType, payload: T) -> Self {
        Self {
            spec_version: SPEC_VERSION,
            timestamp: Utc::now(),
            event,
            payload,
        }
    }
}

/// Event types for JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Command result.
    Result,
    /// Command failed.
    Error,
}

/// Result type discriminator for result payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultType {
    /// District list.
    Districts,
    /// Nearest district lookup.
    Nearest,
    /// Detection history.
    Detections,
    /// Latest detection per district.
    Map,
    /// A newly recorded detection.
    Recorded,
}

/// Payload carrying a list of rows.
#[derive(Debug, Serialize)]
pub struct RowsPayload<'a, R> {
    /// What the rows are.
    pub result_type: ResultType,
    /// Number of rows.
    pub count: usize,
    /// The rows.
    pub rows: &'a [R],
}

/// Error payload for error events.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorPayload {
    /// Error code (`snake_case` identifier).
    pub code: &'static str,
    /// Broad error class.
    pub kind: ErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Whether repeating the same call might succeed.
    pub retryable: bool,
}

impl From<&Error> for ErrorPayload {
    fn from(err: &Error) -> Self {
        Self {
            code: err.code(),
            kind: err.kind(),
            message: err.to_string(),
            retryable: err.is_retryable(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope_serialization() {
        let err = Error::UnknownDistrict {
            district: "Atlantis".to_string(),
        };
        let envelope = JsonEnvelope::new(EventType::Error, ErrorPayload::from(&err));
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["spec_version"], "1.0");
        assert_eq!(value["event"], "error");
        assert_eq!(value["payload"]["code"], "unknown_district");
        assert_eq!(value["payload"]["kind"], "domain");
        assert_eq!(value["payload"]["retryable"], false);
        assert!(
            value["payload"]["message"]
                .as_str()
                .unwrap()
                .contains("Atlantis")
        );
    }

    #[test]
    fn test_result_type_serialization() {
        assert_eq!(serde_json::to_string(&ResultType::Map).unwrap(), "\"map\"");
        assert_eq!(
            serde_json::to_string(&ResultType::Recorded).unwrap(),
            "\"recorded\""
        );
    }
}
