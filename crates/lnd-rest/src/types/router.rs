//! Types for `POST /v2/router/route/estimatefee`.

use serde::{Deserialize, Serialize};

use super::{int_from_str, serialize_opt_as_str};

/// Failure reason reported when the probe succeeded.
pub const FAILURE_REASON_NONE: &str = "FAILURE_REASON_NONE";

/// Route fee estimation request.
///
/// LND takes either `payment_request` alone or `dest` with `amt_sat`. A
/// non-zero `timeout` is only accepted with `payment_request`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EstimateRouteFeeRequest {
    /// Destination public key, base64.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dest: Option<String>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_opt_as_str"
    )]
    pub amt_sat: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_request: Option<String>,

    /// Probe timeout in seconds.
    pub timeout: u32,
}

/// Route fee estimation result.
#[derive(Debug, Clone, Deserialize)]
pub struct EstimateRouteFeeResponse {
    #[serde(deserialize_with = "int_from_str")]
    pub routing_fee_msat: i64,

    /// Worst-case absolute block height of the route, excluding the final hop's delta.
    #[serde(deserialize_with = "int_from_str")]
    pub time_lock_delay: i64,

    #[serde(default)]
    pub failure_reason: Option<String>,
}

impl EstimateRouteFeeResponse {
    /// Whether LND reported a probe failure.
    pub fn failed(&self) -> bool {
        match self.failure_reason.as_deref() {
            None | Some("") | Some(FAILURE_REASON_NONE) => false,
            Some(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_request_omits_destination() {
        let request = EstimateRouteFeeRequest {
            payment_request: Some("lnbc1".to_string()),
            timeout: 5,
            ..Default::default()
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "payment_request": "lnbc1", "timeout": 5 })
        );
    }

    #[test]
    fn test_destination_request_serializes_amount_as_string() {
        let request = EstimateRouteFeeRequest {
            dest: Some("AgI=".to_string()),
            amt_sat: Some(100),
            ..Default::default()
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "dest": "AgI=", "amt_sat": "100", "timeout": 0 })
        );
    }

    #[test]
    fn test_response_parsing() {
        let json = r#"{
            "routing_fee_msat": "1205",
            "time_lock_delay": "850144",
            "failure_reason": "FAILURE_REASON_NONE"
        }"#;
        let response: EstimateRouteFeeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.routing_fee_msat, 1205);
        assert_eq!(response.time_lock_delay, 850_144);
        assert!(!response.failed());
    }

    #[test]
    fn test_response_failure_reason() {
        let json = r#"{
            "routing_fee_msat": "0",
            "time_lock_delay": 0,
            "failure_reason": "FAILURE_REASON_NO_ROUTE"
        }"#;
        let response: EstimateRouteFeeResponse = serde_json::from_str(json).unwrap();
        assert!(response.failed());
    }
}
