//! # Invoice Wrapper
//!
//! Wraps an outgoing bolt11 invoice in an incoming hold invoice that shares
//! its payment hash. The payer pays the incoming invoice; the held HTLC is
//! only settled once the outgoing payment succeeds and reveals the preimage.
//!
//! Before issuing anything the wrapper checks that:
//!
//! - the outgoing amount is within bounds and the incoming amount covers it
//!   with the sybil fee margin
//! - the outgoing invoice only uses routable feature bits
//! - there is enough time left to pay the outgoing invoice
//! - the route's time lock and fee fit inside what the incoming HTLC allows
//!
//! ## Example
//!
//! ```ignore
//! let wrapper = InvoiceWrapper::new(Arc::new(lnd), Arc::new(Bolt11Decoder::new()))
//!     .with_config(WrapperConfig::from_env()?);
//!
//! let wrapped = wrapper.wrap(WrapRequest::new(bolt11, 150_000)).await?;
//! println!("Pay this invoice: {}", wrapped.invoice.payment_request);
//! ```
//!
//! Settling or cancelling the hold invoice once the outgoing payment
//! resolves is left to the caller.

mod clock;
mod config;
mod decoder;
mod error;
mod request;
pub mod stages;
mod wrapper;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{
    WrapperConfig, WrapperConfigBuilder, FEE_ESTIMATE_TIMEOUT_SECS,
    INCOMING_EXPIRATION_BUFFER_MSECS, MAX_EXPIRATION_INCOMING_MSECS, MAX_EXPIRATION_WINDOW_MSECS,
    MAX_FEE_ESTIMATE_BPS,
    MAX_OUTGOING_CLTV_DELTA, MAX_OUTGOING_MSATS, MIN_OUTGOING_MSATS, MIN_SETTLEMENT_CLTV_DELTA,
    SUPPORTED_FEATURE_BITS, ZAP_SYBIL_FEE_MULT,
};
pub use decoder::Bolt11Decoder;
pub use error::{ErrorKind, WrapError};
pub use request::{WrapRequest, WrappedInvoice};
pub use wrapper::InvoiceWrapper;
