//! Outgoing bounds and the sybil fee check.

use crate::config::WrapperConfig;
use crate::error::WrapError;

/// Check the outgoing invoice amount against the configured bounds.
pub fn validate_outgoing(outgoing_msats: Option<u64>, config: &WrapperConfig) -> Result<u64, WrapError> {
    let msats = outgoing_msats.ok_or(WrapError::MissingAmount)?;

    if msats < config.min_outgoing_msats {
        return Err(WrapError::AmountTooLow {
            msats,
            min: config.min_outgoing_msats,
        });
    }
    if msats > config.max_outgoing_msats {
        return Err(WrapError::AmountTooHigh {
            msats,
            max: config.max_outgoing_msats,
        });
    }
    Ok(msats)
}

/// Check that the incoming amount pays at least the sybil multiple of outgoing.
///
/// Compares `outgoing × num > incoming × den` in 128 bits, so equality with
/// the exact multiple is accepted and no rounding is involved.
pub fn validate_incoming(
    incoming_msats: Option<u64>,
    outgoing_msats: u64,
    config: &WrapperConfig,
) -> Result<u64, WrapError> {
    // Zero is treated as absent.
    let incoming = incoming_msats
        .filter(|msats| *msats > 0)
        .ok_or(WrapError::MissingIncomingAmount)?;

    let numerator = u128::from(config.sybil_fee_numerator);
    let denominator = u128::from(config.sybil_fee_denominator);

    if u128::from(outgoing_msats) * numerator > u128::from(incoming) * denominator {
        let required = (u128::from(outgoing_msats) * numerator).div_ceil(denominator);
        return Err(WrapError::SybilFeeTooLow {
            incoming_msats: incoming,
            outgoing_msats,
            required_msats: u64::try_from(required)
                .map_err(|_| WrapError::AmountOverflow("sybil fee threshold"))?,
        });
    }
    Ok(incoming)
}
