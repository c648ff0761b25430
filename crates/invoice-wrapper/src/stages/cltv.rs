//! Final CLTV delta for the incoming invoice.

use wrap_core::RouteEstimate;

use crate::config::WrapperConfig;
use crate::error::WrapError;

/// Derive the incoming invoice's final CLTV delta.
///
/// `worst_case_absolute_height` excludes the payee's final delta, so it is
/// added back before converting to a delta relative to `current_height`.
/// The settlement margin on top leaves us that many blocks to claim the
/// incoming payment after the outgoing one resolves at its latest.
pub fn incoming_cltv_delta(
    estimate: &RouteEstimate,
    outgoing_final_cltv_delta: u32,
    current_height: u32,
    config: &WrapperConfig,
) -> Result<u32, WrapError> {
    let delta = i64::from(estimate.worst_case_absolute_height) + i64::from(outgoing_final_cltv_delta)
        - i64::from(current_height)
        + i64::from(config.min_settlement_cltv_delta);

    if delta > i64::from(config.max_outgoing_cltv_delta) {
        return Err(WrapError::CltvTooHigh {
            cltv_delta: delta,
            max: config.max_outgoing_cltv_delta,
        });
    }

    // Only reachable when the estimator's view of the chain lags the height oracle.
    let min = config
        .min_settlement_cltv_delta
        .saturating_add(outgoing_final_cltv_delta);
    if delta < i64::from(min) {
        return Err(WrapError::CltvTooLow { cltv_delta: delta, min });
    }

    u32::try_from(delta).map_err(|_| WrapError::AmountOverflow("cltv delta"))
}
