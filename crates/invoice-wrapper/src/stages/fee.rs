//! Routing fee budget.

use crate::config::{WrapperConfig, BPS_DENOMINATOR};
use crate::error::WrapError;

/// The fee ceiling for the outgoing payment: `ceil(incoming × bps / 10_000)`.
pub fn max_fee_msats(incoming_msats: u64, max_fee_bps: u64) -> Result<u64, WrapError> {
    let fee = (u128::from(incoming_msats) * u128::from(max_fee_bps)).div_ceil(u128::from(BPS_DENOMINATOR));
    u64::try_from(fee).map_err(|_| WrapError::AmountOverflow("fee budget"))
}

/// Reject estimates that exceed the fee budget; returns the budget.
pub fn validate_fee_budget(
    routing_fee_msats: u64,
    incoming_msats: u64,
    config: &WrapperConfig,
) -> Result<u64, WrapError> {
    let max_fee = max_fee_msats(incoming_msats, config.max_fee_estimate_bps)?;
    if routing_fee_msats > max_fee {
        return Err(WrapError::FeeTooHigh {
            routing_fee_msats,
            max_fee_msats: max_fee,
        });
    }
    Ok(max_fee)
}
