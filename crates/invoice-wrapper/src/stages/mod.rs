//! Pure validation and arithmetic stages of the wrap pipeline.
//!
//! Nothing here performs I/O or logs; the pipeline in `wrapper.rs`
//! sequences these and reports progress.

mod amount;
mod cltv;
mod description;
mod expiry;
mod features;
mod fee;

pub use amount::{validate_incoming, validate_outgoing};
pub use cltv::incoming_cltv_delta;
pub use description::{ensure_exclusive, resolve_description};
pub use expiry::incoming_expiry;
pub use features::validate_features;
pub use fee::{max_fee_msats, validate_fee_budget};
