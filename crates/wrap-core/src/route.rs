//! Route fee estimation types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A request for a route fee estimate towards the outgoing payee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteFeeQuery {
    /// Hex public key of the payee.
    pub destination: String,

    /// Amount that will be sent.
    pub msats: u64,

    /// The raw outgoing payment request, so the node can use its route hints.
    pub bolt11: String,

    /// How long the node may spend probing.
    pub timeout: Duration,
}

/// The node's estimate for delivering the outgoing payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEstimate {
    /// Total routing fee expected.
    pub routing_fee_msats: u64,

    /// Worst-case absolute block height at which the route could still be
    /// pending, not counting the final hop's own CLTV delta.
    pub worst_case_absolute_height: u32,
}

impl RouteEstimate {
    pub fn new(routing_fee_msats: u64, worst_case_absolute_height: u32) -> Self {
        Self {
            routing_fee_msats,
            worst_case_absolute_height,
        }
    }
}
