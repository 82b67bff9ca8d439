//! Fetching chains from peers.
//!
//! Peers expose their chain as JSON:
//!
//! ```json
//! { "length": 3, "chain": [ { "index": 1, "timestamp": 1700000000,
//!   "transactions": [], "proof": 100, "previous_hash": "0" }, ... ] }
//! ```

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use super::{PeerAddress, PeerError};
use crate::blockchain::Block;

/// A peer's reported chain.
#[derive(Debug, Clone, Deserialize)]
pub struct PeerChain {
    pub length: usize,
    pub chain: Vec<Block>,
}

impl PeerChain {
    /// Parse a chain-fetch response body. Both fields are required and
    /// `length` must match the number of blocks sent.
    pub fn from_json(body: &[u8]) -> Result<Self, PeerError> {
        let parsed: PeerChain =
            serde_json::from_slice(body).map_err(|e| PeerError::Malformed(e.to_string()))?;
        if parsed.length != parsed.chain.len() {
            return Err(PeerError::Malformed(format!(
                "length {} disagrees with {} blocks",
                parsed.length,
                parsed.chain.len()
            )));
        }
        Ok(parsed)
    }
}

/// Capability to ask a peer for its chain.
pub trait PeerChainProvider {
    fn fetch_chain(&self, peer: &PeerAddress) -> Result<PeerChain, PeerError>;
}

/// Blocking HTTP client with a per-request timeout.
///
/// Must be built, used and dropped off the async executor (e.g. inside
/// `web::block`), since the blocking client drives its own runtime.
pub struct HttpPeerClient {
    client: Client,
    chain_path: String,
}

impl HttpPeerClient {
    pub fn new(timeout: Duration, chain_path: impl Into<String>) -> Result<Self, PeerError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PeerError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            chain_path: chain_path.into(),
        })
    }

    fn endpoint(&self, peer: &PeerAddress) -> String {
        format!(
            "{}/{}",
            peer.base_url(),
            self.chain_path.trim_start_matches('/')
        )
    }
}

impl PeerChainProvider for HttpPeerClient {
    fn fetch_chain(&self, peer: &PeerAddress) -> Result<PeerChain, PeerError> {
        let url = self.endpoint(peer);

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| PeerError::Transport(format!("GET {url} failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(PeerError::Status(status.as_u16()));
        }

        let body = resp
            .bytes()
            .map_err(|e| PeerError::Transport(format!("reading body from {url}: {e}")))?;
        PeerChain::from_json(&body)
    }
}
