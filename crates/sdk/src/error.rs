//! Error types for the Sefaria SDK.

use serde::{Deserialize, Serialize};

/// Result type for SDK operations.
pub type SefariaResult<T> = Result<T, SefariaError>;

/// Error types that can occur when calling the Sefaria API.
#[derive(Debug, thiserror::Error)]
pub enum SefariaError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error (status {status}): {message}")]
    Api {
        status: u16,
        message: String,
        details: Option<String>,
    },

    /// API answered successfully but the payload carries an error message.
    #[error("Sefaria rejected the request: {0}")]
    Rejected(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Response body was not the JSON we expected.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Connection timeout.
    #[error("Request timed out")]
    Timeout,

    /// Downloaded body exceeds the configured limit.
    #[error("Download exceeds {limit} bytes")]
    TooLarge { limit: usize },

    /// Invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl SefariaError {
    /// Create an API error from a status code and response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(body) {
            Self::Api {
                status,
                message: error_response.error,
                details: error_response.details,
            }
        } else {
            let message = body.trim();
            Self::Api {
                status,
                message: if message.is_empty() {
                    reqwest::StatusCode::from_u16(status)
                        .ok()
                        .and_then(|s| s.canonical_reason())
                        .unwrap_or("Unknown error")
                        .to_string()
                } else {
                    message.chars().take(500).collect()
                },
                details: None,
            }
        }
    }
}

/// Error body returned by the Sefaria API.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_with_error_body() {
        let err = SefariaError::from_response(404, r#"{"error": "Unknown ref"}"#);
        match err {
            SefariaError::Api { status, message, .. } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Unknown ref");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_response_with_plain_body() {
        let err = SefariaError::from_response(502, "Bad Gateway from upstream");
        assert_eq!(
            err.to_string(),
            "API error (status 502): Bad Gateway from upstream"
        );
    }

    #[test]
    fn test_from_response_with_empty_body() {
        let err = SefariaError::from_response(503, "");
        assert_eq!(err.to_string(), "API error (status 503): Service Unavailable");
    }
}
