//! Choosing the wrapped invoice's description.

use wrap_core::{DecodedInvoice, InvoiceDescription};

use crate::error::WrapError;
use crate::request::WrapRequest;

/// Reject requests that set both a description and a description hash.
///
/// Empty strings count as unset.
pub fn ensure_exclusive(description: Option<&str>, description_hash: Option<&str>) -> Result<(), WrapError> {
    match (non_empty(description), non_empty(description_hash)) {
        (Some(_), Some(_)) => Err(WrapError::AmbiguousDescription),
        _ => Ok(()),
    }
}

/// Pick the description for the incoming invoice.
///
/// Priority: caller description, caller hash, the outgoing invoice's hash,
/// then the outgoing invoice's text (empty if it has none).
pub fn resolve_description(
    request: &WrapRequest,
    invoice: &DecodedInvoice,
) -> Result<InvoiceDescription, WrapError> {
    let description = request.description.as_deref();
    let description_hash = request.description_hash.as_deref();
    ensure_exclusive(description, description_hash)?;

    let resolved = if let Some(text) = non_empty(description) {
        InvoiceDescription::Text(text.to_string())
    } else if let Some(hash) = non_empty(description_hash) {
        InvoiceDescription::Hash(hash.to_string())
    } else if let Some(hash) = non_empty(invoice.description_hash.as_deref()) {
        InvoiceDescription::Hash(hash.to_string())
    } else {
        InvoiceDescription::Text(invoice.description_text.clone().unwrap_or_default())
    };
    Ok(resolved)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
