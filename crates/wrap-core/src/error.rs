//! Error types raised by wrapping collaborators.

use std::time::Duration;

use thiserror::Error;

/// Errors raised by a Lightning node backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    /// The node could not be reached.
    #[error("node unavailable: {0}")]
    Unavailable(String),

    /// The request did not complete within its time bound.
    #[error("node request timed out after {0:?}")]
    Timeout(Duration),

    /// The node answered but refused the request.
    #[error("node rejected request: {0}")]
    Rejected(String),

    /// The node answered with something we could not interpret.
    #[error("invalid node response: {0}")]
    InvalidResponse(String),
}

/// Errors raised while decoding a payment request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The string is not a syntactically valid bolt11 invoice.
    #[error("malformed invoice: {0}")]
    Malformed(String),

    /// The invoice parsed but a field does not fit our types.
    #[error("invoice field out of range: {0}")]
    OutOfRange(String),
}
