//! Collaborator traits consumed by the wrapping pipeline.

use async_trait::async_trait;

use crate::error::{DecodeError, NodeError};
use crate::invoice::{DecodedInvoice, HoldInvoice, HoldInvoiceRequest};
use crate::route::{RouteEstimate, RouteFeeQuery};

/// A Lightning node able to estimate routes and issue hold invoices.
///
/// Implementations must support concurrent independent requests.
/// This trait is object-safe and can be used with `Arc<dyn LightningNode>`.
#[async_trait]
pub trait LightningNode: Send + Sync {
    /// Estimate the routing fee and worst-case lock height for paying `query.bolt11`.
    async fn estimate_route_fee(&self, query: RouteFeeQuery) -> Result<RouteEstimate, NodeError>;

    /// Current best block height as seen by the node.
    async fn current_height(&self) -> Result<u32, NodeError>;

    /// Create a hold invoice keyed by `request.payment_hash`.
    async fn create_hold_invoice(
        &self,
        request: HoldInvoiceRequest,
    ) -> Result<HoldInvoice, NodeError>;

    /// Get a human-readable name for this backend.
    fn name(&self) -> &str;
}

/// Parses a bolt11 payment request.
pub trait InvoiceDecoder: Send + Sync {
    fn decode(&self, bolt11: &str) -> Result<DecodedInvoice, DecodeError>;
}
