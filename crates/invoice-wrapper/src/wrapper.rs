//! The wrapping pipeline.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, info, info_span, warn, Instrument};
use wrap_core::{HoldInvoiceRequest, InvoiceDecoder, LightningNode, NodeError, RouteFeeQuery};

use crate::clock::{Clock, SystemClock};
use crate::config::WrapperConfig;
use crate::error::WrapError;
use crate::request::{WrapRequest, WrappedInvoice};
use crate::stages::{
    ensure_exclusive, incoming_cltv_delta, incoming_expiry, resolve_description,
    validate_features, validate_fee_budget, validate_incoming, validate_outgoing,
};

/// Wraps outgoing invoices in incoming hold invoices.
///
/// Validation happens in a fixed order and the first failure aborts the
/// wrap. A hold invoice is only requested from the node once every check
/// has passed, so a failed wrap never leaves an invoice behind.
pub struct InvoiceWrapper {
    node: Arc<dyn LightningNode>,
    decoder: Arc<dyn InvoiceDecoder>,
    config: WrapperConfig,
    clock: Arc<dyn Clock>,
}

impl InvoiceWrapper {
    /// Create a wrapper with the default thresholds and the system clock.
    pub fn new(node: Arc<dyn LightningNode>, decoder: Arc<dyn InvoiceDecoder>) -> Self {
        Self {
            node,
            decoder,
            config: WrapperConfig::default(),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_config(mut self, config: WrapperConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &WrapperConfig {
        &self.config
    }

    /// Wrap `request.bolt11` in a hold invoice for `request.incoming_msats`.
    ///
    /// The route fee estimate and the chain height are fetched concurrently,
    /// each bounded by `fee_estimate_timeout`.
    pub async fn wrap(&self, request: WrapRequest) -> Result<WrappedInvoice, WrapError> {
        let span = info_span!(
            "wrap_invoice",
            node = self.node.name(),
            incoming_msats = request.incoming_msats,
        );

        async {
            let result = self.run(&request).await;
            match &result {
                Ok(wrapped) => info!(
                    payment_hash = %wrapped.invoice.payment_hash,
                    msats = wrapped.invoice.msats,
                    cltv_delta = wrapped.invoice.final_cltv_delta,
                    max_fee_msats = wrapped.max_fee_msats,
                    "Wrapped invoice"
                ),
                Err(e) => warn!(kind = ?e.kind(), "Wrap rejected: {}", e),
            }
            result
        }
        .instrument(span)
        .await
    }

    /// Like [`wrap`](Self::wrap), but gives up after `deadline`.
    ///
    /// A wrap abandoned before issuance creates no invoice.
    pub async fn wrap_with_deadline(
        &self,
        request: WrapRequest,
        deadline: Duration,
    ) -> Result<WrappedInvoice, WrapError> {
        timeout(deadline, self.wrap(request))
            .await
            .map_err(|_| WrapError::DeadlineExceeded(deadline))?
    }

    async fn run(&self, request: &WrapRequest) -> Result<WrappedInvoice, WrapError> {
        let config = &self.config;

        ensure_exclusive(
            request.description.as_deref(),
            request.description_hash.as_deref(),
        )?;

        let invoice = self.decoder.decode(&request.bolt11)?;

        let outgoing_msats = validate_outgoing(invoice.outgoing_msats, config)?;
        let incoming_msats = validate_incoming(request.incoming_msats, outgoing_msats, config)?;
        validate_features(&invoice.feature_bits, &config.supported_feature_bits)?;

        let payment_hash = invoice
            .payment_hash
            .clone()
            .filter(|hash| !hash.is_empty())
            .ok_or(WrapError::MissingPaymentHash)?;

        let description = resolve_description(request, &invoice)?;
        let expires_at = incoming_expiry(invoice.expires_at, self.clock.now(), config)?;

        let query = RouteFeeQuery {
            destination: invoice.destination_node_id.clone(),
            msats: outgoing_msats,
            bolt11: request.bolt11.clone(),
            timeout: config.fee_estimate_timeout,
        };

        debug!(destination = %query.destination, "Estimating route fee");
        let (estimate, height) = tokio::try_join!(
            async {
                bounded(config.fee_estimate_timeout, self.node.estimate_route_fee(query))
                    .await
                    .map_err(WrapError::RouteEstimationFailed)
            },
            async {
                bounded(config.fee_estimate_timeout, self.node.current_height())
                    .await
                    .map_err(WrapError::HeightLookupFailed)
            },
        )?;
        debug!(
            routing_fee_msats = estimate.routing_fee_msats,
            worst_case_height = estimate.worst_case_absolute_height,
            height,
            "Route estimated"
        );

        let final_cltv_delta =
            incoming_cltv_delta(&estimate, invoice.final_cltv_delta, height, config)?;
        let max_fee_msats = validate_fee_budget(estimate.routing_fee_msats, incoming_msats, config)?;

        let hold = self
            .node
            .create_hold_invoice(HoldInvoiceRequest {
                payment_hash,
                description,
                msats: incoming_msats,
                expires_at,
                final_cltv_delta,
            })
            .await
            .map_err(WrapError::Issue)?;

        Ok(WrappedInvoice {
            invoice: hold,
            max_fee_msats,
        })
    }
}

async fn bounded<T>(
    limit: Duration,
    call: impl Future<Output = Result<T, NodeError>>,
) -> Result<T, NodeError> {
    timeout(limit, call)
        .await
        .map_err(|_| NodeError::Timeout(limit))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{DateTime, TimeDelta, Utc};
    use mock_node::{sample_invoice, MockNode, RouteEstimate, StaticDecoder};

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn wrapper(node: Arc<MockNode>) -> InvoiceWrapper {
        InvoiceWrapper::new(node, Arc::new(StaticDecoder::new(sample_invoice(now()))))
            .with_clock(Arc::new(FixedClock(now())))
    }

    #[tokio::test]
    async fn test_query_carries_outgoing_details() {
        let node = Arc::new(MockNode::new(RouteEstimate::new(1_000, 800_040), 800_000));
        let wrapped = wrapper(node.clone())
            .wrap(WrapRequest::new("lnbc1sample", 150_000))
            .await
            .unwrap();

        let queries = node.queries().await;
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].msats, 100_000);
        assert_eq!(queries[0].bolt11, "lnbc1sample");
        assert_eq!(queries[0].destination, format!("02{}", "cd".repeat(32)));
        assert_eq!(queries[0].timeout, Duration::from_secs(5));

        assert_eq!(wrapped.invoice.expires_at, now() + TimeDelta::minutes(5));
    }

    #[tokio::test]
    async fn test_empty_payment_hash_is_missing() {
        let mut invoice = sample_invoice(now());
        invoice.payment_hash = Some(String::new());
        let node = Arc::new(MockNode::new(RouteEstimate::new(1_000, 800_040), 800_000));
        let wrapper = InvoiceWrapper::new(node.clone(), Arc::new(StaticDecoder::new(invoice)))
            .with_clock(Arc::new(FixedClock(now())));

        assert!(matches!(
            wrapper.wrap(WrapRequest::new("lnbc1", 150_000)).await,
            Err(WrapError::MissingPaymentHash)
        ));
        assert!(node.queries().await.is_empty());
    }

    #[tokio::test]
    async fn test_config_is_applied() {
        let config = WrapperConfig::builder()
            .max_fee_estimate_bps(10)
            .build()
            .unwrap();
        let node = Arc::new(MockNode::new(RouteEstimate::new(1_000, 800_040), 800_000));
        let wrapper = wrapper(node.clone()).with_config(config);
        assert_eq!(wrapper.config().max_fee_estimate_bps, 10);

        // 150_000 × 10 / 10_000 = 150
        assert!(matches!(
            wrapper.wrap(WrapRequest::new("lnbc1", 150_000)).await,
            Err(WrapError::FeeTooHigh {
                routing_fee_msats: 1_000,
                max_fee_msats: 150
            })
        ));
        assert!(node.issued().await.is_empty());
    }
}
