//! Mock collaborators for exercising the wrapping pipeline.
//!
//! This crate provides test doubles for the `wrap-core` traits:
//! - `MockNode` - Scripted route estimates, heights and hold invoice issuance
//! - `DelayedNode` - Wraps another node with artificial latency
//! - `StaticDecoder` - Returns a fixed decoded invoice (or error)
//!
//! For a real backend, use the `lnd-rest` crate instead.
//!
//! # Example
//!
//! ```rust
//! use mock_node::{LightningNode, MockNode, RouteEstimate};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_node::NodeError> {
//!     let node = MockNode::new(RouteEstimate::new(2_000, 800_040), 800_000);
//!
//!     let height = node.current_height().await?;
//!     println!("Height: {}", height);
//!     Ok(())
//! }
//! ```

mod decoder;
mod delayed;
mod node;

// Re-export wrap-core types for convenience
pub use wrap_core::{
    async_trait, DecodeError, DecodedInvoice, HoldInvoice, HoldInvoiceRequest, InvoiceDecoder,
    LightningNode, NodeError, RouteEstimate, RouteFeeQuery,
};

pub use decoder::{sample_invoice, StaticDecoder};
pub use delayed::DelayedNode;
pub use node::MockNode;
