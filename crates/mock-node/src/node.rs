//! Scripted node implementation.

use async_trait::async_trait;
use tokio::sync::Mutex;

use wrap_core::{
    HoldInvoice, HoldInvoiceRequest, LightningNode, NodeError, RouteEstimate, RouteFeeQuery,
};

/// A node that answers with preconfigured results and records what it was asked.
///
/// Issued invoices echo the request back with a placeholder payment request
/// of the form `lnmock1<payment_hash>`.
#[derive(Debug)]
pub struct MockNode {
    estimate: Result<RouteEstimate, NodeError>,
    height: Result<u32, NodeError>,
    issue_error: Option<NodeError>,
    queries: Mutex<Vec<RouteFeeQuery>>,
    issued: Mutex<Vec<HoldInvoiceRequest>>,
}

impl MockNode {
    /// Create a node that returns `estimate` and `height` and issues every invoice.
    pub fn new(estimate: RouteEstimate, height: u32) -> Self {
        Self {
            estimate: Ok(estimate),
            height: Ok(height),
            issue_error: None,
            queries: Mutex::new(Vec::new()),
            issued: Mutex::new(Vec::new()),
        }
    }

    /// Make route estimation fail with `error`.
    pub fn failing_estimate(mut self, error: NodeError) -> Self {
        self.estimate = Err(error);
        self
    }

    /// Make height lookups fail with `error`.
    pub fn failing_height(mut self, error: NodeError) -> Self {
        self.height = Err(error);
        self
    }

    /// Make hold invoice creation fail with `error`.
    pub fn failing_issue(mut self, error: NodeError) -> Self {
        self.issue_error = Some(error);
        self
    }

    /// Route fee queries received so far.
    pub async fn queries(&self) -> Vec<RouteFeeQuery> {
        self.queries.lock().await.clone()
    }

    /// Hold invoice requests received so far, including failed ones.
    pub async fn issued(&self) -> Vec<HoldInvoiceRequest> {
        self.issued.lock().await.clone()
    }
}

#[async_trait]
impl LightningNode for MockNode {
    async fn estimate_route_fee(&self, query: RouteFeeQuery) -> Result<RouteEstimate, NodeError> {
        self.queries.lock().await.push(query);
        self.estimate.clone()
    }

    async fn current_height(&self) -> Result<u32, NodeError> {
        self.height.clone()
    }

    async fn create_hold_invoice(
        &self,
        request: HoldInvoiceRequest,
    ) -> Result<HoldInvoice, NodeError> {
        self.issued.lock().await.push(request.clone());

        match &self.issue_error {
            Some(err) => Err(err.clone()),
            None => {
                let payment_request = format!("lnmock1{}", request.payment_hash);
                Ok(HoldInvoice::from_request(&request, payment_request))
            }
        }
    }

    fn name(&self) -> &str {
        "MockNode"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use std::time::Duration;
    use wrap_core::InvoiceDescription;

    fn hold_request() -> HoldInvoiceRequest {
        HoldInvoiceRequest {
            payment_hash: "11".repeat(32),
            description: InvoiceDescription::Text("test".to_string()),
            msats: 150_000,
            expires_at: DateTime::<Utc>::from_timestamp(1_700_000_300, 0).unwrap(),
            final_cltv_delta: 160,
        }
    }

    #[tokio::test]
    async fn test_scripted_estimate_and_height() {
        let node = MockNode::new(RouteEstimate::new(2_000, 800_040), 800_000);

        let query = RouteFeeQuery {
            destination: "02aa".to_string(),
            msats: 100_000,
            bolt11: "lnbc1...".to_string(),
            timeout: Duration::from_secs(5),
        };
        let estimate = node.estimate_route_fee(query.clone()).await.unwrap();

        assert_eq!(estimate, RouteEstimate::new(2_000, 800_040));
        assert_eq!(node.current_height().await.unwrap(), 800_000);
        assert_eq!(node.queries().await, vec![query]);
    }

    #[tokio::test]
    async fn test_issue_echoes_request() {
        let node = MockNode::new(RouteEstimate::new(0, 0), 0);
        let request = hold_request();

        let invoice = node.create_hold_invoice(request.clone()).await.unwrap();

        assert_eq!(invoice.payment_request, format!("lnmock1{}", request.payment_hash));
        assert_eq!(invoice.msats, 150_000);
        assert_eq!(invoice.final_cltv_delta, 160);
        assert_eq!(node.issued().await, vec![request]);
    }

    #[tokio::test]
    async fn test_failures() {
        let node = MockNode::new(RouteEstimate::new(0, 0), 0)
            .failing_height(NodeError::Unavailable("down".to_string()))
            .failing_issue(NodeError::Rejected("duplicate hash".to_string()));

        assert_eq!(
            node.current_height().await,
            Err(NodeError::Unavailable("down".to_string()))
        );
        assert_eq!(
            node.create_hold_invoice(hold_request()).await,
            Err(NodeError::Rejected("duplicate hash".to_string()))
        );
    }

    #[test]
    fn test_node_name() {
        let node = MockNode::new(RouteEstimate::new(0, 0), 0);
        assert_eq!(node.name(), "MockNode");
    }
}
