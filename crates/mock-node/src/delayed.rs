//! Delayed node implementation - wraps another node with artificial latency.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use wrap_core::{
    HoldInvoice, HoldInvoiceRequest, LightningNode, NodeError, RouteEstimate, RouteFeeQuery,
};

/// A node that wraps another node and delays its network calls.
///
/// Useful for testing timeout handling and that independent lookups overlap.
pub struct DelayedNode<N: LightningNode> {
    inner: N,
    estimate_delay: Duration,
    height_delay: Duration,
}

impl<N: LightningNode> DelayedNode<N> {
    /// Delay both route estimation and height lookups by `delay`.
    pub fn new(inner: N, delay: Duration) -> Self {
        Self {
            inner,
            estimate_delay: delay,
            height_delay: delay,
        }
    }

    /// Delay route estimation and height lookups independently.
    pub fn with_delays(inner: N, estimate_delay: Duration, height_delay: Duration) -> Self {
        Self {
            inner,
            estimate_delay,
            height_delay,
        }
    }

    /// Create a node with a delay in milliseconds.
    pub fn with_millis(inner: N, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }

    pub fn inner(&self) -> &N {
        &self.inner
    }
}

#[async_trait]
impl<N: LightningNode> LightningNode for DelayedNode<N> {
    async fn estimate_route_fee(&self, query: RouteFeeQuery) -> Result<RouteEstimate, NodeError> {
        sleep(self.estimate_delay).await;
        self.inner.estimate_route_fee(query).await
    }

    async fn current_height(&self) -> Result<u32, NodeError> {
        sleep(self.height_delay).await;
        self.inner.current_height().await
    }

    // Issuance is not delayed.
    async fn create_hold_invoice(
        &self,
        request: HoldInvoiceRequest,
    ) -> Result<HoldInvoice, NodeError> {
        self.inner.create_hold_invoice(request).await
    }

    fn name(&self) -> &str {
        "DelayedNode"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockNode;
    use std::time::Instant;

    #[tokio::test]
    async fn test_delayed_height() {
        let node = DelayedNode::with_millis(MockNode::new(RouteEstimate::new(0, 0), 42), 100);

        let start = Instant::now();
        let height = node.current_height().await.unwrap();
        let elapsed = start.elapsed();

        assert_eq!(height, 42);
        assert!(elapsed >= Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_node_name() {
        let node = DelayedNode::with_millis(MockNode::new(RouteEstimate::new(0, 0), 0), 0);
        assert_eq!(node.name(), "DelayedNode");
    }
}
