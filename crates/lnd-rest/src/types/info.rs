//! Types for `GET /v1/getinfo`.

use serde::Deserialize;

/// The subset of node info we read.
#[derive(Debug, Clone, Deserialize)]
pub struct GetInfoResponse {
    #[serde(default)]
    pub identity_pubkey: String,

    #[serde(default)]
    pub alias: String,

    pub block_height: u32,

    #[serde(default)]
    pub synced_to_chain: bool,
}
