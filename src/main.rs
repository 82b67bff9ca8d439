use actix_web::{App, HttpServer, rt, web};
use dotenvy::dotenv;
use log::{info, warn};

use ledger_node::api::{self, AppState};
use ledger_node::config::Config;
use ledger_node::node::Node;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let cfg = Config::from_env();
    let node = Node::from_config(&cfg);
    for peer in &cfg.peers {
        if let Err(e) = node.register_peer(peer) {
            warn!("STARTUP - ignoring bootstrap peer: {e}");
        }
    }

    info!(
        "⛓️ Starting node {} at http://{}:{} (difficulty {})",
        cfg.node_id, cfg.host, cfg.port, cfg.difficulty
    );

    let state = web::Data::new(AppState::new(node));

    if !cfg.resolve_interval.is_zero() {
        spawn_resolver(state.clone(), cfg.resolve_interval);
    }

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((cfg.host.as_str(), cfg.port))?
    .run()
    .await
}

/// Periodically run resolution so the node catches up without a client asking.
fn spawn_resolver(state: web::Data<AppState>, period: std::time::Duration) {
    rt::spawn(async move {
        let mut ticker = rt::time::interval(period);
        loop {
            ticker.tick().await;
            let worker_state = state.clone();
            match web::block(move || worker_state.node.resolve()).await {
                Ok(Ok(true)) => info!("RESOLVE - periodic pass replaced local chain"),
                Ok(Ok(false)) => {}
                Ok(Err(e)) => warn!("RESOLVE - periodic pass failed: {e}"),
                Err(e) => warn!("RESOLVE - worker pool unavailable: {e}"),
            }
        }
    });
}
