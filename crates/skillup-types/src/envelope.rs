//! Response envelopes used by every backend endpoint

use serde::{Deserialize, Serialize};

/// Successful response wrapper: `{ "success": true, "data": ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Backend-reported success flag
    #[serde(default = "default_success")]
    pub success: bool,
    /// Payload
    pub data: T,
}

const fn default_success() -> bool {
    true
}

/// Error body returned with non-2xx statuses: `{ "message": ... }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human readable message
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Body used when the server did not send parseable JSON
    #[must_use]
    pub fn synthetic(status: u16) -> Self {
        Self {
            message: Some(format!("Server error ({status})")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_unwraps_data() {
        let envelope: ApiEnvelope<Vec<String>> =
            serde_json::from_str(r#"{"success": true, "data": ["Programming"]}"#).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.data, vec!["Programming".to_string()]);
    }

    #[test]
    fn test_synthetic_error_body() {
        assert_eq!(
            ErrorBody::synthetic(502).message.as_deref(),
            Some("Server error (502)")
        );
    }
}
