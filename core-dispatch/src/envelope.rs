//! Normalized result of a dispatched call.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Synthetic body delivered when the transport failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Native transport error code, passed through verbatim
    #[serde(rename = "errorCode")]
    pub error_code: i64,
    /// Always `false`
    pub status: bool,
    pub message: String,
}

impl ErrorEnvelope {
    pub fn new(error_code: i64, message: impl Into<String>) -> Self {
        Self {
            error_code,
            status: false,
            message: message.into(),
        }
    }
}

/// Either the parsed response body or a transport error envelope.
///
/// Serializes untagged, so callers see the same loosely-typed document in
/// both cases.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseEnvelope {
    Success(Value),
    Failure(ErrorEnvelope),
}

impl ResponseEnvelope {
    pub fn is_success(&self) -> bool {
        matches!(self, ResponseEnvelope::Success(_))
    }

    pub fn as_success(&self) -> Option<&Value> {
        match self {
            ResponseEnvelope::Success(value) => Some(value),
            ResponseEnvelope::Failure(_) => None,
        }
    }

    pub fn as_failure(&self) -> Option<&ErrorEnvelope> {
        match self {
            ResponseEnvelope::Success(_) => None,
            ResponseEnvelope::Failure(error) => Some(error),
        }
    }

    /// Transport error code, for failure envelopes
    pub fn error_code(&self) -> Option<i64> {
        self.as_failure().map(|error| error.error_code)
    }

    /// The document as the caller sees it
    pub fn to_value(&self) -> Value {
        match self {
            ResponseEnvelope::Success(value) => value.clone(),
            ResponseEnvelope::Failure(error) => serde_json::json!({
                "errorCode": error.error_code,
                "status": error.status,
                "message": error.message,
            }),
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            ResponseEnvelope::Success(value) => value,
            failure => failure.to_value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_serializes_with_error_code_key() {
        let envelope = ResponseEnvelope::Failure(ErrorEnvelope::new(-1001, "Oops."));

        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"errorCode": -1001, "status": false, "message": "Oops."})
        );
        assert_eq!(envelope.to_value(), serde_json::to_value(&envelope).unwrap());
        assert_eq!(envelope.error_code(), Some(-1001));
        assert!(!envelope.is_success());
    }

    #[test]
    fn test_success_serializes_transparently() {
        let envelope = ResponseEnvelope::Success(json!({"status": true, "id": 42}));

        let text = serde_json::to_string(&envelope).unwrap();
        assert!(!text.contains("Success"));
        assert_eq!(
            serde_json::from_str::<Value>(&text).unwrap(),
            json!({"status": true, "id": 42})
        );
        assert_eq!(envelope.as_success().unwrap()["id"], 42);
        assert!(envelope.as_failure().is_none());
        assert_eq!(envelope.into_value(), json!({"status": true, "id": 42}));
    }

    #[test]
    fn test_error_envelope_round_trip() {
        let parsed: ErrorEnvelope =
            serde_json::from_str(r#"{"errorCode":-1004,"status":false,"message":"m"}"#).unwrap();
        assert_eq!(parsed, ErrorEnvelope::new(-1004, "m"));
    }
}
