use actix_web::{HttpResponse, get, post, web};
use log::{info, warn};

use super::ApiError;
use super::models::{
    AppState, RegisterNodesRequest, RegisterNodesResponse, RejectedNode, ResolveResponse,
};

/// Register peers. Each address is handled on its own; a bad one is
/// reported back without blocking the rest.
#[post("/nodes/register/")]
pub async fn register_nodes(
    state: web::Data<AppState>,
    body: web::Json<RegisterNodesRequest>,
) -> Result<HttpResponse, ApiError> {
    let nodes = match body.into_inner().nodes {
        Some(nodes) if !nodes.is_empty() => nodes,
        _ => {
            return Ok(HttpResponse::BadRequest().body("Error: Please supply a valid list of nodes"));
        }
    };

    let mut rejected = Vec::new();
    for raw in nodes {
        match state.node.register_peer(&raw) {
            Ok(peer) => info!("NODES - registered peer {peer}"),
            Err(e) => {
                warn!("NODES - rejected {raw:?}: {e}");
                rejected.push(RejectedNode {
                    address: raw,
                    error: e.to_string(),
                });
            }
        }
    }

    Ok(HttpResponse::Created().json(RegisterNodesResponse {
        message: "New nodes have been added".to_string(),
        total_nodes: state.node.peers()?,
        rejected,
    }))
}

/// Run longest-chain resolution against all registered peers.
#[get("/nodes/resolve/")]
pub async fn resolve(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let worker_state = state.clone();
    let replaced = web::block(move || worker_state.node.resolve()).await??;
    let (chain, _) = state.node.chain()?;

    let message = if replaced {
        "Our chain was replaced"
    } else {
        "Our chain is authoritative"
    };
    Ok(HttpResponse::Ok().json(ResolveResponse {
        message: message.to_string(),
        replaced,
        chain,
    }))
}
