//! End-to-end tests for the wrapping pipeline against mock collaborators.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use invoice_wrapper::{ErrorKind, FixedClock, InvoiceWrapper, WrapError, WrapRequest};
use mock_node::{
    sample_invoice, DecodeError, DecodedInvoice, DelayedNode, MockNode, NodeError, RouteEstimate,
    StaticDecoder,
};
use wrap_core::InvoiceDescription;

const HEIGHT: u32 = 850_000;

fn now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

fn healthy_node() -> MockNode {
    MockNode::new(RouteEstimate::new(2_000, HEIGHT + 40), HEIGHT)
}

fn wrapper_with(node: Arc<MockNode>, invoice: DecodedInvoice) -> InvoiceWrapper {
    InvoiceWrapper::new(node, Arc::new(StaticDecoder::new(invoice)))
        .with_clock(Arc::new(FixedClock(now())))
}

fn wrapper(node: Arc<MockNode>) -> InvoiceWrapper {
    wrapper_with(node, sample_invoice(now()))
}

#[tokio::test]
async fn test_wraps_valid_invoice() {
    let node = Arc::new(healthy_node());
    let wrapped = wrapper(node.clone())
        .wrap(WrapRequest::new("lnbc1outgoing", 150_000))
        .await
        .unwrap();

    assert_eq!(wrapped.invoice.payment_hash, "5a".repeat(32));
    assert_eq!(wrapped.invoice.msats, 150_000);
    assert_eq!(wrapped.invoice.final_cltv_delta, 160);
    assert_eq!(wrapped.invoice.expires_at, now() + TimeDelta::minutes(5));
    assert_eq!(wrapped.max_fee_msats, 3_750);
    assert_eq!(wrapped.invoice.payment_request, format!("lnmock1{}", "5a".repeat(32)));

    let issued = node.issued().await;
    assert_eq!(issued.len(), 1);
    assert_eq!(
        issued[0].description,
        InvoiceDescription::Text("outgoing".to_string())
    );
}

#[tokio::test]
async fn test_wrapped_invoice_json_shape() {
    let wrapped = wrapper(Arc::new(healthy_node()))
        .wrap(WrapRequest::new("lnbc1outgoing", 150_000))
        .await
        .unwrap();

    let json = serde_json::to_value(&wrapped).unwrap();
    assert_eq!(json["max_fee_msats"], 3_750);
    assert_eq!(json["invoice"]["msats"], 150_000);
    assert_eq!(json["invoice"]["final_cltv_delta"], 160);
    assert_eq!(json["invoice"]["payment_hash"], "5a".repeat(32));
    assert_eq!(
        json["invoice"]["payment_request"],
        format!("lnmock1{}", "5a".repeat(32))
    );

    let expires_at: DateTime<Utc> =
        serde_json::from_value(json["invoice"]["expires_at"].clone()).unwrap();
    assert_eq!(expires_at, now() + TimeDelta::minutes(5));
}

#[tokio::test]
async fn test_caller_description_hash_used() {
    let node = Arc::new(healthy_node());
    wrapper(node.clone())
        .wrap(WrapRequest::new("lnbc1", 150_000).with_description_hash("ab".repeat(32)))
        .await
        .unwrap();

    let issued = node.issued().await;
    assert_eq!(issued[0].description, InvoiceDescription::Hash("ab".repeat(32)));
}

#[tokio::test]
async fn test_concurrent_wraps_share_one_wrapper() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<InvoiceWrapper>();

    let node = Arc::new(healthy_node());
    let wrapper = Arc::new(wrapper(node.clone()));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let wrapper = wrapper.clone();
            tokio::spawn(async move { wrapper.wrap(WrapRequest::new("lnbc1", 150_000)).await })
        })
        .collect();
    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }
    assert_eq!(node.issued().await.len(), 4);
}

#[tokio::test]
async fn test_sybil_fee_too_low() {
    let node = Arc::new(healthy_node());
    let result = wrapper(node.clone())
        .wrap(WrapRequest::new("lnbc1", 140_000))
        .await;

    match result {
        Err(e @ WrapError::SybilFeeTooLow { .. }) => assert_eq!(e.kind(), ErrorKind::Input),
        other => panic!("Expected SybilFeeTooLow, got {other:?}"),
    }
    assert!(node.queries().await.is_empty());
    assert!(node.issued().await.is_empty());
}

#[tokio::test]
async fn test_ambiguous_description_checked_before_decoding() {
    let node = Arc::new(healthy_node());
    let wrapper = InvoiceWrapper::new(
        node.clone(),
        Arc::new(StaticDecoder::failing(DecodeError::Malformed("bad".to_string()))),
    );

    let request = WrapRequest::new("garbage", 150_000)
        .with_description("mine")
        .with_description_hash("beef");
    assert!(matches!(
        wrapper.wrap(request).await,
        Err(WrapError::AmbiguousDescription)
    ));
}

#[tokio::test]
async fn test_decode_failure() {
    let node = Arc::new(healthy_node());
    let wrapper = InvoiceWrapper::new(
        node.clone(),
        Arc::new(StaticDecoder::failing(DecodeError::Malformed("bad".to_string()))),
    );

    assert!(matches!(
        wrapper.wrap(WrapRequest::new("garbage", 150_000)).await,
        Err(WrapError::Decode(DecodeError::Malformed(_)))
    ));
    assert!(node.issued().await.is_empty());
}

#[tokio::test]
async fn test_input_rejections_issue_nothing() {
    let mut cases: Vec<(DecodedInvoice, Option<u64>)> = Vec::new();

    let mut no_amount = sample_invoice(now());
    no_amount.outgoing_msats = None;
    cases.push((no_amount, Some(150_000)));

    let mut tiny = sample_invoice(now());
    tiny.outgoing_msats = Some(899);
    cases.push((tiny, Some(150_000)));

    let mut no_features = sample_invoice(now());
    no_features.feature_bits.clear();
    cases.push((no_features, Some(150_000)));

    let mut odd_feature = sample_invoice(now());
    odd_feature.feature_bits.insert(50);
    cases.push((odd_feature, Some(150_000)));

    let mut expiring = sample_invoice(now());
    expiring.expires_at = now() + TimeDelta::minutes(4);
    cases.push((expiring, Some(150_000)));

    let mut no_hash = sample_invoice(now());
    no_hash.payment_hash = None;
    cases.push((no_hash, Some(150_000)));

    cases.push((sample_invoice(now()), None));

    for (invoice, incoming) in cases {
        let node = Arc::new(healthy_node());
        let request = WrapRequest {
            incoming_msats: incoming,
            ..WrapRequest::new("lnbc1", 0)
        };
        let result = wrapper_with(node.clone(), invoice).wrap(request).await;

        let err = result.expect_err("wrap should be rejected");
        assert_eq!(err.kind(), ErrorKind::Input, "unexpected kind for {err}");
        assert!(node.queries().await.is_empty());
        assert!(node.issued().await.is_empty());
    }
}

#[tokio::test]
async fn test_cltv_too_high() {
    let node = Arc::new(MockNode::new(RouteEstimate::new(1_000, HEIGHT + 381), HEIGHT));
    let result = wrapper(node.clone()).wrap(WrapRequest::new("lnbc1", 150_000)).await;

    assert!(matches!(
        result,
        Err(WrapError::CltvTooHigh {
            cltv_delta: 501,
            max: 500
        })
    ));
    assert!(node.issued().await.is_empty());
}

#[tokio::test]
async fn test_fee_budget_boundary() {
    let node = Arc::new(MockNode::new(RouteEstimate::new(3_750, HEIGHT + 40), HEIGHT));
    assert!(wrapper(node).wrap(WrapRequest::new("lnbc1", 150_000)).await.is_ok());

    let node = Arc::new(MockNode::new(RouteEstimate::new(3_751, HEIGHT + 40), HEIGHT));
    let result = wrapper(node.clone()).wrap(WrapRequest::new("lnbc1", 150_000)).await;
    match result {
        Err(e @ WrapError::FeeTooHigh { .. }) => assert_eq!(e.kind(), ErrorKind::Policy),
        other => panic!("Expected FeeTooHigh, got {other:?}"),
    }
    assert!(node.issued().await.is_empty());
}

#[tokio::test]
async fn test_dependency_failures_mapped() {
    let node = Arc::new(healthy_node().failing_estimate(NodeError::Rejected("no route".to_string())));
    assert!(matches!(
        wrapper(node.clone()).wrap(WrapRequest::new("lnbc1", 150_000)).await,
        Err(WrapError::RouteEstimationFailed(NodeError::Rejected(_)))
    ));
    assert!(node.issued().await.is_empty());

    let node = Arc::new(healthy_node().failing_height(NodeError::Unavailable("down".to_string())));
    assert!(matches!(
        wrapper(node.clone()).wrap(WrapRequest::new("lnbc1", 150_000)).await,
        Err(WrapError::HeightLookupFailed(NodeError::Unavailable(_)))
    ));
    assert!(node.issued().await.is_empty());

    let node = Arc::new(healthy_node().failing_issue(NodeError::Rejected("duplicate".to_string())));
    let err = wrapper(node)
        .wrap(WrapRequest::new("lnbc1", 150_000))
        .await
        .unwrap_err();
    assert!(matches!(err, WrapError::Issue(NodeError::Rejected(_))));
    assert_eq!(err.kind(), ErrorKind::Dependency);
}

fn delayed_wrapper(node: Arc<DelayedNode<MockNode>>) -> InvoiceWrapper {
    InvoiceWrapper::new(node, Arc::new(StaticDecoder::new(sample_invoice(now()))))
        .with_clock(Arc::new(FixedClock(now())))
}

#[tokio::test(start_paused = true)]
async fn test_estimate_and_height_run_concurrently() {
    let node = Arc::new(DelayedNode::with_millis(healthy_node(), 100));
    let wrapper = delayed_wrapper(node.clone());

    let start = tokio::time::Instant::now();
    wrapper.wrap(WrapRequest::new("lnbc1", 150_000)).await.unwrap();
    let elapsed = start.elapsed();

    assert!(elapsed >= Duration::from_millis(100));
    assert!(elapsed < Duration::from_millis(150), "took {elapsed:?}");
    assert_eq!(node.inner().issued().await.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_slow_estimate_times_out() {
    let node = Arc::new(DelayedNode::with_delays(
        healthy_node(),
        Duration::from_secs(6),
        Duration::ZERO,
    ));
    let result = delayed_wrapper(node.clone())
        .wrap(WrapRequest::new("lnbc1", 150_000))
        .await;

    match result {
        Err(WrapError::RouteEstimationFailed(NodeError::Timeout(limit))) => {
            assert_eq!(limit, Duration::from_secs(5));
        }
        other => panic!("Expected route estimation timeout, got {other:?}"),
    }
    assert!(node.inner().issued().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_slow_height_times_out() {
    let node = Arc::new(DelayedNode::with_delays(
        healthy_node(),
        Duration::ZERO,
        Duration::from_secs(6),
    ));
    let result = delayed_wrapper(node.clone())
        .wrap(WrapRequest::new("lnbc1", 150_000))
        .await;

    assert!(matches!(
        result,
        Err(WrapError::HeightLookupFailed(NodeError::Timeout(_)))
    ));
    assert!(node.inner().issued().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_deadline_exceeded() {
    let node = Arc::new(DelayedNode::with_millis(healthy_node(), 100));
    let result = delayed_wrapper(node.clone())
        .wrap_with_deadline(WrapRequest::new("lnbc1", 150_000), Duration::from_millis(50))
        .await;

    match result {
        Err(WrapError::DeadlineExceeded(deadline)) => {
            assert_eq!(deadline, Duration::from_millis(50));
        }
        other => panic!("Expected DeadlineExceeded, got {other:?}"),
    }
    assert!(node.inner().issued().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_deadline_met() {
    let node = Arc::new(DelayedNode::with_millis(healthy_node(), 100));
    let wrapped = delayed_wrapper(node)
        .wrap_with_deadline(WrapRequest::new("lnbc1", 150_000), Duration::from_secs(1))
        .await
        .unwrap();
    assert_eq!(wrapped.invoice.final_cltv_delta, 160);
}
