//! Wrap request and result types.

use serde::{Deserialize, Serialize};
use wrap_core::HoldInvoice;

/// A caller's request to wrap an outgoing invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapRequest {
    /// The outgoing bolt11 payment request.
    pub bolt11: String,

    /// Amount the payer will send us, including our margin.
    pub incoming_msats: Option<u64>,

    /// Description for the incoming invoice.
    pub description: Option<String>,

    /// Description hash for the incoming invoice.
    pub description_hash: Option<String>,
}

impl WrapRequest {
    /// Create a request with no description override.
    pub fn new(bolt11: impl Into<String>, incoming_msats: u64) -> Self {
        Self {
            bolt11: bolt11.into(),
            incoming_msats: Some(incoming_msats),
            description: None,
            description_hash: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_description_hash(mut self, hash: impl Into<String>) -> Self {
        self.description_hash = Some(hash.into());
        self
    }
}

/// A successfully wrapped invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrappedInvoice {
    /// The incoming hold invoice to hand to the payer.
    pub invoice: HoldInvoice,

    /// Fee ceiling for the outgoing payment attempt.
    pub max_fee_msats: u64,
}
