//! LND REST adapter.
//!
//! This crate implements [`wrap_core::LightningNode`] on top of LND's REST
//! API. It supports:
//!
//! - Route fee estimation via the router's probe endpoint
//! - Reading the current block height from `getinfo`
//! - Creating hold invoices
//!
//! Requests are authenticated with a hex macaroon in the
//! `Grpc-Metadata-macaroon` header.
//!
//! # Example
//!
//! ```no_run
//! use lnd_rest::{LndClient, LndConfig};
//! use wrap_core::LightningNode;
//!
//! # async fn example() -> Result<(), lnd_rest::LndError> {
//! let config = LndConfig::from_env()?;
//! let client = LndClient::connect(config).await?;
//!
//! let height = client.get_info().await?.block_height;
//! println!("Block height: {}", height);
//! println!("Backend: {}", client.name());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::LndClient;
pub use config::{LndConfig, DEFAULT_HTTP_TIMEOUT_SECS};
pub use error::LndError;
pub use types::*;
