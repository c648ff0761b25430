//! LND REST client.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::Utc;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use wrap_core::{
    HoldInvoice, HoldInvoiceRequest, InvoiceDescription, LightningNode, NodeError, RouteEstimate,
    RouteFeeQuery,
};

use crate::config::LndConfig;
use crate::error::LndError;
use crate::types::{
    AddHoldInvoiceRequest, AddHoldInvoiceResponse, ErrorResponse, EstimateRouteFeeRequest,
    EstimateRouteFeeResponse, GetInfoResponse,
};

const MACAROON_HEADER: &str = "Grpc-Metadata-macaroon";

/// Client for LND's REST API.
#[derive(Clone)]
pub struct LndClient {
    http: Client,
    config: LndConfig,
}

impl LndClient {
    /// Create a client. No request is made until the first call.
    pub fn new(config: LndConfig) -> Result<Self, LndError> {
        config.validate()?;

        let http = Client::builder()
            .timeout(config.http_timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(LndError::Http)?;

        Ok(Self { http, config })
    }

    /// Create a client and confirm the node answers.
    pub async fn connect(config: LndConfig) -> Result<Self, LndError> {
        let client = Self::new(config)?;
        let info = client.get_info().await?;
        if !info.synced_to_chain {
            warn!("LND node {} is not synced to chain", info.alias);
        }
        debug!(
            "Connected to LND {} at height {}",
            info.identity_pubkey, info.block_height
        );
        Ok(client)
    }

    /// Read node info, including the current block height.
    pub async fn get_info(&self) -> Result<GetInfoResponse, LndError> {
        let request = self.http.get(self.config.get_info_url());
        self.send(request).await
    }

    /// Probe the route to an invoice's payee.
    pub async fn estimate_route_fee_raw(
        &self,
        body: &EstimateRouteFeeRequest,
    ) -> Result<EstimateRouteFeeResponse, LndError> {
        let request = self.http.post(self.config.estimate_fee_url()).json(body);
        self.send(request).await
    }

    /// Create a hold invoice.
    pub async fn add_hold_invoice(
        &self,
        body: &AddHoldInvoiceRequest,
    ) -> Result<AddHoldInvoiceResponse, LndError> {
        let request = self.http.post(self.config.hold_invoice_url()).json(body);
        self.send(request).await
    }

    /// Get the configuration.
    pub fn config(&self) -> &LndConfig {
        &self.config
    }

    async fn send<R: DeserializeOwned>(&self, request: RequestBuilder) -> Result<R, LndError> {
        let response = request
            .header(MACAROON_HEADER, &self.config.macaroon_hex)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LndError::Timeout(self.config.http_timeout)
                } else {
                    LndError::Http(e)
                }
            })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.message)
                .ok()
                .filter(|m| !m.is_empty())
                .unwrap_or(body);
            return Err(LndError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl LightningNode for LndClient {
    async fn estimate_route_fee(&self, query: RouteFeeQuery) -> Result<RouteEstimate, NodeError> {
        let body = estimate_request(&query)?;
        debug!("Estimating route fee to {}", query.destination);

        let response = self.estimate_route_fee_raw(&body).await?;
        Ok(route_estimate(response)?)
    }

    async fn current_height(&self) -> Result<u32, NodeError> {
        Ok(self.get_info().await?.block_height)
    }

    async fn create_hold_invoice(
        &self,
        request: HoldInvoiceRequest,
    ) -> Result<HoldInvoice, NodeError> {
        let body = hold_invoice_request(&request, Utc::now())?;
        let response = self.add_hold_invoice(&body).await?;
        Ok(HoldInvoice::from_request(&request, response.payment_request))
    }

    fn name(&self) -> &str {
        "LND"
    }
}

impl std::fmt::Debug for LndClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LndClient")
            .field("config", &self.config)
            .finish()
    }
}

fn hex_to_base64(field: &str, value: &str) -> Result<String, LndError> {
    let bytes = hex::decode(value)
        .map_err(|e| LndError::InvalidRequest(format!("{field} is not hex: {e}")))?;
    Ok(BASE64.encode(bytes))
}

fn estimate_request(query: &RouteFeeQuery) -> Result<EstimateRouteFeeRequest, LndError> {
    if !query.bolt11.is_empty() {
        let timeout = u32::try_from(query.timeout.as_secs()).map_err(|_| {
            LndError::InvalidRequest(format!("timeout {:?} out of range", query.timeout))
        })?;
        return Ok(EstimateRouteFeeRequest {
            payment_request: Some(query.bolt11.clone()),
            timeout,
            ..Default::default()
        });
    }

    // Destination mode rejects a non-zero timeout.
    Ok(EstimateRouteFeeRequest {
        dest: Some(hex_to_base64("destination", &query.destination)?),
        amt_sat: Some(query.msats / 1_000),
        payment_request: None,
        timeout: 0,
    })
}

fn route_estimate(response: EstimateRouteFeeResponse) -> Result<RouteEstimate, LndError> {
    if response.failed() {
        return Err(LndError::ProbeFailed(
            response.failure_reason.unwrap_or_default(),
        ));
    }

    let fee = u64::try_from(response.routing_fee_msat).map_err(|_| {
        LndError::InvalidResponse(format!("routing_fee_msat {}", response.routing_fee_msat))
    })?;
    let height = u32::try_from(response.time_lock_delay).map_err(|_| {
        LndError::InvalidResponse(format!("time_lock_delay {}", response.time_lock_delay))
    })?;
    Ok(RouteEstimate::new(fee, height))
}

fn hold_invoice_request(
    request: &HoldInvoiceRequest,
    now: chrono::DateTime<Utc>,
) -> Result<AddHoldInvoiceRequest, LndError> {
    let (memo, description_hash) = match &request.description {
        InvoiceDescription::Text(text) => (Some(text.clone()), None),
        InvoiceDescription::Hash(hash) => (None, Some(hex_to_base64("description hash", hash)?)),
    };

    // LND measures expiry from creation; never send zero, which means "default".
    let expiry = (request.expires_at - now).num_seconds().max(1) as u64;

    Ok(AddHoldInvoiceRequest {
        hash: hex_to_base64("payment hash", &request.payment_hash)?,
        value_msat: request.msats,
        memo,
        description_hash,
        expiry,
        cltv_expiry: u64::from(request.final_cltv_delta),
    })
}
