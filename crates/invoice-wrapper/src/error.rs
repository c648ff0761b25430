//! Error types for invoice wrapping.

use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;
use wrap_core::{DecodeError, NodeError};

/// Broad classes of wrap failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller sent something we will not wrap; correctable by the caller.
    Input,
    /// Economic or time-lock policy rejected the wrap.
    Policy,
    /// An external service failed.
    Dependency,
}

/// Errors that can occur while wrapping an invoice.
///
/// Every variant aborts the wrap; nothing is retried.
#[derive(Debug, Error)]
pub enum WrapError {
    /// The payment request could not be decoded.
    #[error("unable to decode invoice: {0}")]
    Decode(#[from] DecodeError),

    #[error("invoice hash is missing")]
    MissingPaymentHash,

    #[error("outgoing invoice is missing amount")]
    MissingAmount,

    #[error("invoice amount is too low: {msats} msats (min {min})")]
    AmountTooLow { msats: u64, min: u64 },

    #[error("invoice amount is too high: {msats} msats (max {max})")]
    AmountTooHigh { msats: u64, max: u64 },

    #[error("incoming invoice amount is missing")]
    MissingIncomingAmount,

    #[error("sybil fee is too low: incoming {incoming_msats} msats, need at least {required_msats} for outgoing {outgoing_msats}")]
    SybilFeeTooLow {
        incoming_msats: u64,
        outgoing_msats: u64,
        required_msats: u64,
    },

    #[error("invoice features are missing")]
    MissingFeatures,

    #[error("unsupported feature bit: {bit}")]
    UnsupportedFeature { bit: u32 },

    #[error("only one of description or description hash is allowed")]
    AmbiguousDescription,

    #[error("invoice expiration is too soon: {expires_at} is before {earliest}")]
    ExpirationTooSoon {
        expires_at: DateTime<Utc>,
        earliest: DateTime<Utc>,
    },

    #[error("route fee estimation failed: {0}")]
    RouteEstimationFailed(#[source] NodeError),

    #[error("block height lookup failed: {0}")]
    HeightLookupFailed(#[source] NodeError),

    #[error("estimated outgoing cltv delta is too high: {cltv_delta} (max {max})")]
    CltvTooHigh { cltv_delta: i64, max: u32 },

    #[error("estimated outgoing cltv delta is too low: {cltv_delta} (min {min})")]
    CltvTooLow { cltv_delta: i64, min: u32 },

    #[error("estimated fees are too high: {routing_fee_msats} msats (max {max_fee_msats})")]
    FeeTooHigh {
        routing_fee_msats: u64,
        max_fee_msats: u64,
    },

    #[error("hold invoice creation failed: {0}")]
    Issue(#[source] NodeError),

    #[error("wrap did not finish within {0:?}")]
    DeadlineExceeded(Duration),

    /// An intermediate amount does not fit in 64 bits.
    #[error("amount overflow computing {0}")]
    AmountOverflow(&'static str),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl WrapError {
    /// Classify the error.
    ///
    /// Configuration and overflow problems are reported as policy failures
    /// since they come from operator settings rather than the caller.
    pub fn kind(&self) -> ErrorKind {
        match self {
            WrapError::MissingPaymentHash
            | WrapError::MissingAmount
            | WrapError::AmountTooLow { .. }
            | WrapError::AmountTooHigh { .. }
            | WrapError::MissingIncomingAmount
            | WrapError::SybilFeeTooLow { .. }
            | WrapError::MissingFeatures
            | WrapError::UnsupportedFeature { .. }
            | WrapError::AmbiguousDescription
            | WrapError::ExpirationTooSoon { .. } => ErrorKind::Input,

            WrapError::CltvTooHigh { .. }
            | WrapError::CltvTooLow { .. }
            | WrapError::FeeTooHigh { .. }
            | WrapError::AmountOverflow(_)
            | WrapError::Configuration(_) => ErrorKind::Policy,

            WrapError::Decode(_)
            | WrapError::RouteEstimationFailed(_)
            | WrapError::HeightLookupFailed(_)
            | WrapError::Issue(_)
            | WrapError::DeadlineExceeded(_) => ErrorKind::Dependency,
        }
    }
}
