use actix_web::{HttpResponse, get, post, web};
use log::info;

use super::ApiError;
use super::models::{AppState, ChainResponse, MineResponse, ValidateResponse};

/// Get the full blockchain.
#[get("/chain/")]
pub async fn get_chain(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let (chain, length) = state.node.chain()?;
    Ok(HttpResponse::Ok().json(ChainResponse { chain, length }))
}

/// Validate the whole chain.
#[get("/validate/")]
pub async fn validate_chain(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let valid = state.node.is_chain_valid()?;
    let (_, length) = state.node.chain()?;
    Ok(HttpResponse::Ok().json(ValidateResponse {
        valid,
        length,
        difficulty: state.node.pow().difficulty(),
    }))
}

/// Mine a new block from the pending buffer:
/// - Search PoW against the current last block (on the blocking pool)
/// - Credit the reward transaction to this node
/// - Append the block, draining the pending buffer
#[post("/mine/")]
pub async fn mine_block(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let worker_state = state.clone();
    let block = web::block(move || worker_state.node.mine()).await??;

    info!(
        "POST /mine/ - block #{} forged with {} txs",
        block.index,
        block.transactions.len()
    );
    Ok(HttpResponse::Ok().json(MineResponse {
        message: "New Block Forged".to_string(),
        index: block.index,
        transactions: block.transactions,
        proof: block.proof,
        previous_hash: block.previous_hash,
    }))
}
