//! Invoice types for both sides of a wrap.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bolt11 payment request after decoding.
///
/// Optional fields mirror what a decoder may legitimately fail to find;
/// the wrapping pipeline decides which absences are fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedInvoice {
    /// Payment hash as lowercase hex.
    pub payment_hash: Option<String>,

    /// Amount requested, if the invoice carries one.
    pub outgoing_msats: Option<u64>,

    /// Feature bits that are set, required or optional.
    pub feature_bits: BTreeSet<u32>,

    /// Inline description.
    pub description_text: Option<String>,

    /// Hex sha256 of a description held elsewhere.
    pub description_hash: Option<String>,

    /// Absolute time after which the invoice can no longer be paid.
    pub expires_at: DateTime<Utc>,

    /// Minimum final CLTV delta the payee requires.
    pub final_cltv_delta: u32,

    /// Hex-encoded public key of the payee.
    pub destination_node_id: String,
}

/// The description carried by a wrapped invoice. Exactly one form is ever set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceDescription {
    /// Inline text.
    Text(String),
    /// Hex sha256 of the description.
    Hash(String),
}

impl InvoiceDescription {
    pub fn text(&self) -> Option<&str> {
        match self {
            InvoiceDescription::Text(text) => Some(text),
            InvoiceDescription::Hash(_) => None,
        }
    }

    pub fn hash(&self) -> Option<&str> {
        match self {
            InvoiceDescription::Text(_) => None,
            InvoiceDescription::Hash(hash) => Some(hash),
        }
    }
}

/// Parameters for the incoming hold invoice, fully validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldInvoiceRequest {
    /// Payment hash shared with the outgoing invoice.
    pub payment_hash: String,

    /// Description or description hash.
    pub description: InvoiceDescription,

    /// Amount the payer is asked for.
    pub msats: u64,

    /// Absolute expiry of the hold invoice.
    pub expires_at: DateTime<Utc>,

    /// Final CLTV delta for the hold invoice.
    pub final_cltv_delta: u32,
}

/// A hold invoice created by the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldInvoice {
    /// Encoded bolt11 payment request to hand to the payer.
    pub payment_request: String,
    pub payment_hash: String,
    pub msats: u64,
    pub expires_at: DateTime<Utc>,
    pub final_cltv_delta: u32,
}

impl HoldInvoice {
    /// Build the created invoice from the request that produced it.
    pub fn from_request(request: &HoldInvoiceRequest, payment_request: impl Into<String>) -> Self {
        Self {
            payment_request: payment_request.into(),
            payment_hash: request.payment_hash.clone(),
            msats: request.msats,
            expires_at: request.expires_at,
            final_cltv_delta: request.final_cltv_delta,
        }
    }
}
