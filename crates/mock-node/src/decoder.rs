//! Static decoder implementation and invoice fixtures.

use std::collections::BTreeSet;

use chrono::{DateTime, TimeDelta, Utc};

use wrap_core::{DecodeError, DecodedInvoice, InvoiceDecoder};

/// A decoder that ignores its input and returns a fixed result.
#[derive(Debug, Clone)]
pub struct StaticDecoder {
    result: Result<DecodedInvoice, DecodeError>,
}

impl StaticDecoder {
    pub fn new(invoice: DecodedInvoice) -> Self {
        Self { result: Ok(invoice) }
    }

    /// A decoder that rejects every payment request.
    pub fn failing(error: DecodeError) -> Self {
        Self { result: Err(error) }
    }
}

impl InvoiceDecoder for StaticDecoder {
    fn decode(&self, _bolt11: &str) -> Result<DecodedInvoice, DecodeError> {
        self.result.clone()
    }
}

/// A well-formed outgoing invoice expiring ten minutes after `now`.
///
/// 100,000 msats, feature bits {9, 15, 17}, final CLTV delta 40 and an
/// inline description.
pub fn sample_invoice(now: DateTime<Utc>) -> DecodedInvoice {
    DecodedInvoice {
        payment_hash: Some("5a".repeat(32)),
        outgoing_msats: Some(100_000),
        feature_bits: BTreeSet::from([9, 15, 17]),
        description_text: Some("outgoing".to_string()),
        description_hash: None,
        expires_at: now + TimeDelta::minutes(10),
        final_cltv_delta: 40,
        destination_node_id: format!("02{}", "cd".repeat(32)),
    }
}
