use actix_web::{HttpResponse, get, web};

use super::ApiError;
use super::models::{AppState, StatsResponse};

#[get("/stats/")]
pub async fn get_stats(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let node = &state.node;
    let (chain, height) = node.chain()?;

    let last_interval_secs = match chain.as_slice() {
        [.., older, newer] => Some((newer.timestamp - older.timestamp).max(0)),
        _ => None,
    };

    Ok(HttpResponse::Ok().json(StatsResponse {
        node_id: node.id().to_string(),
        height,
        difficulty: node.pow().difficulty(),
        pending: node.pending()?.len(),
        peers: node.peers()?.len(),
        last_interval_secs,
    }))
}
