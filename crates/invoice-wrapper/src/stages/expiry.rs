//! Incoming invoice expiry.

use chrono::{DateTime, Utc};

use crate::config::WrapperConfig;
use crate::error::WrapError;

/// Compute the incoming invoice's expiry from the outgoing one.
///
/// The result always precedes the outgoing expiry by at least the buffer
/// and is never later than `now + max_window - buffer`.
pub fn incoming_expiry(
    outgoing_expires_at: DateTime<Utc>,
    now: DateTime<Utc>,
    config: &WrapperConfig,
) -> Result<DateTime<Utc>, WrapError> {
    let buffer = config.incoming_expiration_buffer;
    let max_window = config.max_incoming_expiration;
    let overflow = || WrapError::AmountOverflow("expiry");

    let earliest = now.checked_add_signed(buffer).ok_or_else(overflow)?;
    if outgoing_expires_at < earliest {
        return Err(WrapError::ExpirationTooSoon {
            expires_at: outgoing_expires_at,
            earliest,
        });
    }

    let latest = now.checked_add_signed(max_window).ok_or_else(overflow)?;
    let base = if outgoing_expires_at > latest {
        latest
    } else {
        outgoing_expires_at
    };
    base.checked_sub_signed(buffer).ok_or_else(overflow)
}
