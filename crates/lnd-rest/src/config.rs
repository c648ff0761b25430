//! Configuration types for lnd-rest.

use std::env;
use std::fmt;
use std::time::Duration;

use crate::error::LndError;

/// Default per-request HTTP timeout.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Configuration for connecting to LND's REST API.
#[derive(Clone)]
pub struct LndConfig {
    /// Base URL of the REST listener (e.g., "https://localhost:8080").
    pub rest_url: String,
    /// Hex-encoded macaroon sent with every request.
    pub macaroon_hex: String,
    /// Accept self-signed TLS certificates, as LND generates by default.
    pub accept_invalid_certs: bool,
    pub http_timeout: Duration,
}

impl LndConfig {
    /// Create a new configuration with the given base URL and macaroon.
    pub fn new(rest_url: impl Into<String>, macaroon_hex: impl Into<String>) -> Self {
        let rest_url: String = rest_url.into();
        Self {
            rest_url: rest_url.trim_end_matches('/').to_string(),
            macaroon_hex: macaroon_hex.into(),
            accept_invalid_certs: false,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Required:
    /// - `LND_REST_URL`
    /// - `LND_MACAROON_HEX`
    ///
    /// Optional:
    /// - `LND_ACCEPT_INVALID_CERTS` (default: false)
    /// - `LND_HTTP_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, LndError> {
        let rest_url = env::var("LND_REST_URL")
            .map_err(|_| LndError::Config("LND_REST_URL not set".to_string()))?;
        let macaroon_hex = env::var("LND_MACAROON_HEX")
            .map_err(|_| LndError::Config("LND_MACAROON_HEX not set".to_string()))?;

        let mut config = Self::new(rest_url, macaroon_hex);

        if let Ok(raw) = env::var("LND_ACCEPT_INVALID_CERTS") {
            config.accept_invalid_certs = matches!(
                raw.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes"
            );
        }

        if let Ok(raw) = env::var("LND_HTTP_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                LndError::Config(format!("LND_HTTP_TIMEOUT_SECS is not a valid number: {raw}"))
            })?;
            config.http_timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    /// Check the URL scheme and macaroon encoding.
    pub fn validate(&self) -> Result<(), LndError> {
        if !(self.rest_url.starts_with("https://") || self.rest_url.starts_with("http://")) {
            return Err(LndError::Config(format!(
                "REST URL must be http(s): {}",
                self.rest_url
            )));
        }
        if self.macaroon_hex.is_empty() || hex::decode(&self.macaroon_hex).is_err() {
            return Err(LndError::Config("macaroon must be non-empty hex".to_string()));
        }
        if self.http_timeout.is_zero() {
            return Err(LndError::Config("HTTP timeout must be non-zero".to_string()));
        }
        Ok(())
    }

    /// Get the route fee estimation endpoint URL.
    pub fn estimate_fee_url(&self) -> String {
        format!("{}/v2/router/route/estimatefee", self.rest_url)
    }

    /// Get the node info endpoint URL.
    pub fn get_info_url(&self) -> String {
        format!("{}/v1/getinfo", self.rest_url)
    }

    /// Get the hold invoice endpoint URL.
    pub fn hold_invoice_url(&self) -> String {
        format!("{}/v2/invoices/hodl", self.rest_url)
    }
}

impl fmt::Debug for LndConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LndConfig")
            .field("rest_url", &self.rest_url)
            .field("macaroon_hex", &"<redacted>")
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}
