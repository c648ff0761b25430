//! Thresholds for the wrapping pipeline.

use std::collections::BTreeSet;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use chrono::TimeDelta;

use crate::error::WrapError;

/// Smallest outgoing amount we will wrap.
pub const MIN_OUTGOING_MSATS: u64 = 900;
/// Largest outgoing amount we will wrap.
pub const MAX_OUTGOING_MSATS: u64 = 900_000_000;
/// Longest lifetime granted to an incoming hold invoice.
pub const MAX_EXPIRATION_INCOMING_MSECS: i64 = 900_000;
/// Runway kept between incoming and outgoing expiry.
pub const INCOMING_EXPIRATION_BUFFER_MSECS: i64 = 300_000;
/// Largest final CLTV delta we will put on an incoming invoice.
pub const MAX_OUTGOING_CLTV_DELTA: u32 = 500;
/// Blocks reserved to settle the incoming invoice after the outgoing one resolves.
pub const MIN_SETTLEMENT_CLTV_DELTA: u32 = 80;
/// Bound on the route fee estimate call.
pub const FEE_ESTIMATE_TIMEOUT_SECS: u64 = 5;
/// Largest acceptable routing fee, in basis points of the incoming amount (2.5%).
pub const MAX_FEE_ESTIMATE_BPS: u64 = 250;
/// Incoming must be at least outgoing × 10/7.
pub const ZAP_SYBIL_FEE_MULT: (u64, u64) = (10, 7);

/// Feature bits an outgoing invoice may set.
///
/// 8/9 variable-length onion, 14/15 payment secret, 16/17 basic MPP,
/// 25 blinded paths, 48/49 TLV payment data, 149 trampoline routing,
/// 151 electrum trampoline routing.
pub const SUPPORTED_FEATURE_BITS: [u32; 11] = [8, 9, 14, 15, 16, 17, 25, 48, 49, 149, 151];

/// Upper bound on the configurable expiry window.
pub const MAX_EXPIRATION_WINDOW_MSECS: i64 = 86_400_000;

/// Basis-point denominator.
pub(crate) const BPS_DENOMINATOR: u64 = 10_000;

/// Configuration for the invoice wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperConfig {
    pub min_outgoing_msats: u64,
    pub max_outgoing_msats: u64,

    /// Sybil fee multiplier as numerator / denominator.
    pub sybil_fee_numerator: u64,
    pub sybil_fee_denominator: u64,

    pub supported_feature_bits: BTreeSet<u32>,

    /// Maximum window for incoming invoice expiry.
    pub max_incoming_expiration: TimeDelta,

    /// Buffer subtracted from the outgoing expiry.
    pub incoming_expiration_buffer: TimeDelta,

    pub min_settlement_cltv_delta: u32,
    pub max_outgoing_cltv_delta: u32,

    /// Time bound on the route fee estimate and the height lookup.
    pub fee_estimate_timeout: Duration,

    /// Fee budget in basis points of the incoming amount.
    pub max_fee_estimate_bps: u64,
}

impl Default for WrapperConfig {
    fn default() -> Self {
        Self {
            min_outgoing_msats: MIN_OUTGOING_MSATS,
            max_outgoing_msats: MAX_OUTGOING_MSATS,
            sybil_fee_numerator: ZAP_SYBIL_FEE_MULT.0,
            sybil_fee_denominator: ZAP_SYBIL_FEE_MULT.1,
            supported_feature_bits: BTreeSet::from(SUPPORTED_FEATURE_BITS),
            max_incoming_expiration: TimeDelta::milliseconds(MAX_EXPIRATION_INCOMING_MSECS),
            incoming_expiration_buffer: TimeDelta::milliseconds(INCOMING_EXPIRATION_BUFFER_MSECS),
            min_settlement_cltv_delta: MIN_SETTLEMENT_CLTV_DELTA,
            max_outgoing_cltv_delta: MAX_OUTGOING_CLTV_DELTA,
            fee_estimate_timeout: Duration::from_secs(FEE_ESTIMATE_TIMEOUT_SECS),
            max_fee_estimate_bps: MAX_FEE_ESTIMATE_BPS,
        }
    }
}

impl WrapperConfig {
    /// Create configuration from environment variables.
    ///
    /// Every variable is optional and falls back to the default:
    /// - `WRAP_MIN_OUTGOING_MSATS` (default: 900)
    /// - `WRAP_MAX_OUTGOING_MSATS` (default: 900000000)
    /// - `WRAP_MAX_EXPIRATION_MSECS` (default: 900000)
    /// - `WRAP_EXPIRATION_BUFFER_MSECS` (default: 300000)
    /// - `WRAP_MIN_SETTLEMENT_CLTV_DELTA` (default: 80)
    /// - `WRAP_MAX_OUTGOING_CLTV_DELTA` (default: 500)
    /// - `WRAP_FEE_ESTIMATE_TIMEOUT_SECS` (default: 5)
    /// - `WRAP_MAX_FEE_ESTIMATE_BPS` (default: 250)
    ///
    /// Unparsable values are an error rather than silently ignored.
    pub fn from_env() -> Result<Self, WrapError> {
        let defaults = Self::default();

        let config = Self {
            min_outgoing_msats: env_or("WRAP_MIN_OUTGOING_MSATS", defaults.min_outgoing_msats)?,
            max_outgoing_msats: env_or("WRAP_MAX_OUTGOING_MSATS", defaults.max_outgoing_msats)?,
            max_incoming_expiration: env_millis_or(
                "WRAP_MAX_EXPIRATION_MSECS",
                MAX_EXPIRATION_INCOMING_MSECS,
            )?,
            incoming_expiration_buffer: env_millis_or(
                "WRAP_EXPIRATION_BUFFER_MSECS",
                INCOMING_EXPIRATION_BUFFER_MSECS,
            )?,
            min_settlement_cltv_delta: env_or(
                "WRAP_MIN_SETTLEMENT_CLTV_DELTA",
                defaults.min_settlement_cltv_delta,
            )?,
            max_outgoing_cltv_delta: env_or(
                "WRAP_MAX_OUTGOING_CLTV_DELTA",
                defaults.max_outgoing_cltv_delta,
            )?,
            fee_estimate_timeout: Duration::from_secs(env_or(
                "WRAP_FEE_ESTIMATE_TIMEOUT_SECS",
                FEE_ESTIMATE_TIMEOUT_SECS,
            )?),
            max_fee_estimate_bps: env_or(
                "WRAP_MAX_FEE_ESTIMATE_BPS",
                defaults.max_fee_estimate_bps,
            )?,
            ..defaults
        };

        config.validate()?;
        Ok(config)
    }

    /// Check that the thresholds are mutually consistent.
    pub fn validate(&self) -> Result<(), WrapError> {
        if self.min_outgoing_msats == 0 || self.min_outgoing_msats > self.max_outgoing_msats {
            return Err(WrapError::Configuration(format!(
                "outgoing amount bounds [{}, {}] are empty",
                self.min_outgoing_msats, self.max_outgoing_msats
            )));
        }
        if self.sybil_fee_denominator == 0 || self.sybil_fee_numerator < self.sybil_fee_denominator {
            return Err(WrapError::Configuration(format!(
                "sybil fee multiplier {}/{} must be at least 1",
                self.sybil_fee_numerator, self.sybil_fee_denominator
            )));
        }
        if self.incoming_expiration_buffer <= TimeDelta::zero()
            || self.max_incoming_expiration <= self.incoming_expiration_buffer
        {
            return Err(WrapError::Configuration(format!(
                "expiration buffer {}ms must be positive and below the {}ms window",
                self.incoming_expiration_buffer.num_milliseconds(),
                self.max_incoming_expiration.num_milliseconds()
            )));
        }
        if self.max_incoming_expiration > TimeDelta::milliseconds(MAX_EXPIRATION_WINDOW_MSECS) {
            return Err(WrapError::Configuration(format!(
                "expiration window {}ms exceeds {}ms",
                self.max_incoming_expiration.num_milliseconds(),
                MAX_EXPIRATION_WINDOW_MSECS
            )));
        }
        if self.min_settlement_cltv_delta >= self.max_outgoing_cltv_delta {
            return Err(WrapError::Configuration(format!(
                "settlement delta {} leaves no room under max cltv delta {}",
                self.min_settlement_cltv_delta, self.max_outgoing_cltv_delta
            )));
        }
        if self.fee_estimate_timeout.is_zero() {
            return Err(WrapError::Configuration(
                "fee estimate timeout must be non-zero".to_string(),
            ));
        }
        if self.max_fee_estimate_bps > BPS_DENOMINATOR {
            return Err(WrapError::Configuration(format!(
                "fee budget {} bps exceeds 100%",
                self.max_fee_estimate_bps
            )));
        }
        Ok(())
    }

    /// Create a new config builder.
    pub fn builder() -> WrapperConfigBuilder {
        WrapperConfigBuilder::default()
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> Result<T, WrapError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| WrapError::Configuration(format!("{name} is not a valid number: {raw}"))),
        Err(_) => Ok(default),
    }
}

fn env_millis_or(name: &str, default: i64) -> Result<TimeDelta, WrapError> {
    let millis = env_or(name, default)?;
    TimeDelta::try_milliseconds(millis)
        .ok_or_else(|| WrapError::Configuration(format!("{name} is out of range: {millis}")))
}

/// Builder for WrapperConfig.
#[derive(Debug, Default)]
pub struct WrapperConfigBuilder {
    config: WrapperConfig,
}

impl WrapperConfigBuilder {
    /// Set the outgoing amount bounds.
    pub fn outgoing_msats_range(mut self, min: u64, max: u64) -> Self {
        self.config.min_outgoing_msats = min;
        self.config.max_outgoing_msats = max;
        self
    }

    /// Set the sybil fee multiplier as a fraction.
    pub fn sybil_fee_multiplier(mut self, numerator: u64, denominator: u64) -> Self {
        self.config.sybil_fee_numerator = numerator;
        self.config.sybil_fee_denominator = denominator;
        self
    }

    /// Replace the supported feature bits.
    pub fn supported_feature_bits(mut self, bits: impl IntoIterator<Item = u32>) -> Self {
        self.config.supported_feature_bits = bits.into_iter().collect();
        self
    }

    /// Set the expiry window and buffer.
    pub fn expiration(mut self, max_window: TimeDelta, buffer: TimeDelta) -> Self {
        self.config.max_incoming_expiration = max_window;
        self.config.incoming_expiration_buffer = buffer;
        self
    }

    /// Set the CLTV band.
    pub fn cltv_deltas(mut self, min_settlement: u32, max_outgoing: u32) -> Self {
        self.config.min_settlement_cltv_delta = min_settlement;
        self.config.max_outgoing_cltv_delta = max_outgoing;
        self
    }

    pub fn fee_estimate_timeout(mut self, timeout: Duration) -> Self {
        self.config.fee_estimate_timeout = timeout;
        self
    }

    pub fn max_fee_estimate_bps(mut self, bps: u64) -> Self {
        self.config.max_fee_estimate_bps = bps;
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<WrapperConfig, WrapError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
