//! Request and response bodies for the LND REST endpoints we use.
//!
//! LND's REST gateway encodes 64-bit integers as JSON strings and byte
//! fields as standard base64.

mod info;
mod invoices;
mod router;

pub use info::GetInfoResponse;
pub use invoices::{AddHoldInvoiceRequest, AddHoldInvoiceResponse};
pub use router::{EstimateRouteFeeRequest, EstimateRouteFeeResponse, FAILURE_REASON_NONE};

use serde::{Deserialize, Deserializer};

/// Error body returned with non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

/// Accept an integer encoded either as a JSON number or a string.
pub(crate) fn int_from_str<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(i64),
    }

    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Number(n) => Ok(n),
        StringOrNumber::String(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

pub(crate) fn serialize_as_str<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(value)
}

pub(crate) fn serialize_opt_as_str<S>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match value {
        Some(value) => serializer.collect_str(value),
        None => serializer.serialize_none(),
    }
}
