//! Wire DTOs for the Serverify control API.
//!
//! # Design
//! These types mirror the server's JSON schema but are defined independently
//! of the `serverify-server` crate. Integration tests catch schema drift.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /session` and of its success response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionBody {
    pub session: String,
}

/// One request recorded against a session's mock endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log {
    pub method: String,
    pub headers: HashMap<String, String>,
    pub path: String,
    pub query: HashMap<String, String>,
    /// Raw request body as received; not re-parsed.
    pub body: String,
    #[serde(rename = "requestedAt")]
    pub requested_at: DateTime<Utc>,
}

/// Request logs of a session, in the order the server reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Logs {
    pub histories: Vec<Log>,
}

/// Envelope carried by every non-2xx response.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorEnvelope {
    #[serde(default)]
    pub serverify_error: ErrorDetail,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorDetail {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn log_reads_requested_at_as_utc_instant() {
        let raw = r#"{
            "method": "POST",
            "headers": {"Content-Type": "application/json"},
            "path": "/test",
            "query": {"qk": "qv"},
            "body": "[1, 2]",
            "requestedAt": "2024-07-01T15:00:00Z"
        }"#;
        let log: Log = serde_json::from_str(raw).unwrap();
        assert_eq!(log.requested_at, Utc.with_ymd_and_hms(2024, 7, 1, 15, 0, 0).unwrap());
        assert_eq!(log.headers["Content-Type"], "application/json");
        assert_eq!(log.body, "[1, 2]");
    }

    #[test]
    fn log_normalizes_offset_timestamps_to_utc() {
        let raw = r#"{"method":"GET","headers":{},"path":"/","query":{},"body":"",
            "requestedAt":"2024-07-02T00:00:00+09:00"}"#;
        let log: Log = serde_json::from_str(raw).unwrap();
        assert_eq!(log.requested_at, Utc.with_ymd_and_hms(2024, 7, 1, 15, 0, 0).unwrap());
    }

    #[test]
    fn log_rejects_malformed_timestamp() {
        let raw = r#"{"method":"GET","headers":{},"path":"/","query":{},"body":"",
            "requestedAt":"yesterday"}"#;
        assert!(serde_json::from_str::<Log>(raw).is_err());
    }

    #[test]
    fn error_envelope_tolerates_missing_fields() {
        let envelope: ErrorEnvelope = serde_json::from_str("{}").unwrap();
        assert_eq!(envelope.serverify_error.message, "");

        let envelope: ErrorEnvelope = serde_json::from_str(r#"{"serverify_error":{}}"#).unwrap();
        assert_eq!(envelope.serverify_error.message, "");
    }
}
