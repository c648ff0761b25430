//! Core traits and types for hold-invoice wrapping.
//!
//! This crate provides the shared boundary between the wrapping pipeline
//! and the services it consumes. It defines:
//!
//! - [`LightningNode`] - Route fee estimation, chain height and hold invoice issuance
//! - [`InvoiceDecoder`] - Parsing a bolt11 payment request
//! - [`DecodedInvoice`] / [`RouteEstimate`] / [`HoldInvoiceRequest`] / [`HoldInvoice`] -
//!   Values exchanged across the boundary
//! - [`NodeError`] / [`DecodeError`] - Errors raised by those services
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use wrap_core::{
//!     HoldInvoice, HoldInvoiceRequest, LightningNode, NodeError, RouteEstimate, RouteFeeQuery,
//! };
//! use async_trait::async_trait;
//!
//! struct FlatFeeNode;
//!
//! #[async_trait]
//! impl LightningNode for FlatFeeNode {
//!     async fn estimate_route_fee(&self, _query: RouteFeeQuery) -> Result<RouteEstimate, NodeError> {
//!         Ok(RouteEstimate::new(1_000, 800_040))
//!     }
//!
//!     async fn current_height(&self) -> Result<u32, NodeError> {
//!         Ok(800_000)
//!     }
//!
//!     async fn create_hold_invoice(&self, request: HoldInvoiceRequest) -> Result<HoldInvoice, NodeError> {
//!         Err(NodeError::Rejected(format!("read-only node, hash {}", request.payment_hash)))
//!     }
//!
//!     fn name(&self) -> &str {
//!         "FlatFeeNode"
//!     }
//! }
//! ```

mod error;
mod invoice;
mod node;
mod route;

pub use error::{DecodeError, NodeError};
pub use invoice::{DecodedInvoice, HoldInvoice, HoldInvoiceRequest, InvoiceDescription};
pub use node::{InvoiceDecoder, LightningNode};
pub use route::{RouteEstimate, RouteFeeQuery};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
