//! Feature bit allow-list.

use std::collections::BTreeSet;

use crate::error::WrapError;

/// Reject invoices that set no features or any feature we cannot route.
///
/// The first unsupported bit in ascending order is reported.
pub fn validate_features(bits: &BTreeSet<u32>, supported: &BTreeSet<u32>) -> Result<(), WrapError> {
    if bits.is_empty() {
        return Err(WrapError::MissingFeatures);
    }

    match bits.difference(supported).next() {
        Some(bit) => Err(WrapError::UnsupportedFeature { bit: *bit }),
        None => Ok(()),
    }
}
