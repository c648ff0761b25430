//! Types for `POST /v2/invoices/hodl`.

use serde::{Deserialize, Serialize};

use super::serialize_as_str;

/// Hold invoice creation request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AddHoldInvoiceRequest {
    /// Payment hash, base64.
    pub hash: String,

    #[serde(serialize_with = "serialize_as_str")]
    pub value_msat: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,

    /// Description hash, base64.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_hash: Option<String>,

    /// Seconds until expiry.
    #[serde(serialize_with = "serialize_as_str")]
    pub expiry: u64,

    #[serde(serialize_with = "serialize_as_str")]
    pub cltv_expiry: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddHoldInvoiceResponse {
    pub payment_request: String,
}
