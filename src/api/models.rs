use crate::blockchain::Block;
use crate::network::PeerAddress;
use crate::node::Node;
use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Shared application state: the node engine.
pub struct AppState {
    pub node: Node,
}

impl AppState {
    pub fn new(node: Node) -> Self {
        Self { node }
    }
}

/* ---------- Chain API Models ---------- */

/// Wire shape peers read during resolution.
#[derive(Serialize)]
pub struct ChainResponse {
    pub chain: Vec<Block>,
    pub length: usize,
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
    pub difficulty: usize,
}

#[derive(Serialize)]
pub struct MineResponse {
    pub message: String,
    pub index: u64,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

/* ---------- TX API Models ---------- */

#[derive(Deserialize)]
pub struct NewTxRequest {
    pub sender: String,
    pub recipient: String,
    pub amount: Number,
}

#[derive(Serialize)]
pub struct NewTxResponse {
    pub message: String,
    pub index: u64,
}

#[derive(Serialize)]
pub struct PendingResponse {
    pub size: usize,
    pub transactions: Vec<Transaction>,
}

/* ---------- Node API Models ---------- */

#[derive(Deserialize)]
pub struct RegisterNodesRequest {
    pub nodes: Option<Vec<String>>,
}

#[derive(Serialize)]
pub struct RejectedNode {
    pub address: String,
    pub error: String,
}

#[derive(Serialize)]
pub struct RegisterNodesResponse {
    pub message: String,
    pub total_nodes: Vec<PeerAddress>,
    pub rejected: Vec<RejectedNode>,
}

#[derive(Serialize)]
pub struct ResolveResponse {
    pub message: String,
    pub replaced: bool,
    pub chain: Vec<Block>,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub node_id: String,
    pub height: usize,
    pub difficulty: usize,
    pub pending: usize,
    pub peers: usize,
    pub last_interval_secs: Option<i64>,
}
