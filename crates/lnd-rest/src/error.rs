//! Error types for lnd-rest.

use std::time::Duration;

use thiserror::Error;
use wrap_core::NodeError;

/// Errors that can occur when talking to LND.
#[derive(Debug, Error)]
pub enum LndError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// LND answered with a non-success status.
    #[error("LND error {status}: {message}")]
    Api { status: u16, message: String },

    /// The route probe reported a failure reason.
    #[error("route probe failed: {0}")]
    ProbeFailed(String),

    /// The request timed out.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// A response field was missing or out of range.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// A request field could not be encoded.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<LndError> for NodeError {
    fn from(err: LndError) -> Self {
        match err {
            LndError::Http(e) => NodeError::Unavailable(e.to_string()),
            LndError::Timeout(limit) => NodeError::Timeout(limit),
            LndError::Api { message, .. } => NodeError::Rejected(message),
            LndError::ProbeFailed(reason) => NodeError::Rejected(reason),
            LndError::InvalidRequest(message) => NodeError::Rejected(message),
            LndError::Json(e) => NodeError::InvalidResponse(e.to_string()),
            LndError::InvalidResponse(message) => NodeError::InvalidResponse(message),
            LndError::Config(message) => NodeError::Unavailable(message),
        }
    }
}
