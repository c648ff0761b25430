//! Bolt11 decoding backed by `lightning-invoice`.

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use lightning_invoice::{Bolt11Invoice, Bolt11InvoiceDescriptionRef};
use wrap_core::{DecodeError, DecodedInvoice, InvoiceDecoder};

/// Decodes bolt11 payment requests and checks their signature.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bolt11Decoder;

impl Bolt11Decoder {
    pub fn new() -> Self {
        Self
    }
}

impl InvoiceDecoder for Bolt11Decoder {
    fn decode(&self, bolt11: &str) -> Result<DecodedInvoice, DecodeError> {
        let invoice = Bolt11Invoice::from_str(bolt11.trim())
            .map_err(|e| DecodeError::Malformed(e.to_string()))?;

        let (description_text, description_hash) = match invoice.description() {
            Bolt11InvoiceDescriptionRef::Direct(text) => (Some(text.to_string()), None),
            Bolt11InvoiceDescriptionRef::Hash(hash) => (None, Some(hash.0.to_string())),
        };

        let expires_at = invoice
            .duration_since_epoch()
            .checked_add(invoice.expiry_time())
            .and_then(|at| {
                let secs = i64::try_from(at.as_secs()).ok()?;
                DateTime::<Utc>::from_timestamp(secs, at.subsec_nanos())
            })
            .ok_or_else(|| DecodeError::OutOfRange("expiry".to_string()))?;

        let final_cltv_delta = u32::try_from(invoice.min_final_cltv_expiry_delta())
            .map_err(|_| DecodeError::OutOfRange("min final cltv expiry delta".to_string()))?;

        let feature_bits = invoice
            .features()
            .map(|features| set_bits(features.le_flags()))
            .unwrap_or_default();

        let destination_node_id = invoice
            .payee_pub_key()
            .map(ToString::to_string)
            .unwrap_or_else(|| invoice.recover_payee_pub_key().to_string());

        Ok(DecodedInvoice {
            payment_hash: Some(invoice.payment_hash().to_string()),
            outgoing_msats: invoice.amount_milli_satoshis(),
            feature_bits,
            description_text,
            description_hash,
            expires_at,
            final_cltv_delta,
            destination_node_id,
        })
    }
}

/// Positions of set bits in a little-endian feature vector.
fn set_bits(le_flags: &[u8]) -> BTreeSet<u32> {
    let mut bits = BTreeSet::new();
    for (byte_index, byte) in le_flags.iter().enumerate() {
        for offset in 0..8 {
            if byte & (1 << offset) != 0 {
                bits.insert(byte_index as u32 * 8 + offset);
            }
        }
    }
    bits
}
