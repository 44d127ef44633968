use actix_web::{HttpResponse, get, post, web};
use log::{info, warn};

use super::error::ApiError;
use super::models::{
    AppState, NodesResponse, RegisterNodesRequest, RegisterNodesResponse, ResolveResponse,
};
use crate::network::consensus;

/// Register peers. Every entry must parse or none is added.
#[post("/nodes/register")]
pub async fn register_nodes(
    state: web::Data<AppState>,
    body: web::Json<RegisterNodesRequest>,
) -> Result<HttpResponse, ApiError> {
    if body.nodes.is_empty() {
        return Err(ApiError::InvalidPeers(
            "please supply a valid list of nodes".to_string(),
        ));
    }

    let added = state.peers.register_all(body.nodes.as_slice()).map_err(|err| {
        warn!("POST /nodes/register - rejected: {err}");
        ApiError::InvalidPeers(err.to_string())
    })?;
    info!("POST /nodes/register - {} peer(s) registered", added.len());

    Ok(HttpResponse::Created().json(RegisterNodesResponse {
        message: "New nodes have been added".to_string(),
        total_nodes: state.peers.peers(),
    }))
}

#[get("/nodes")]
pub async fn list_nodes(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(NodesResponse {
        nodes: state.peers.peers(),
    })
}

/// Run one consensus round against every known peer.
///
/// The ledger lock is only held to snapshot and to swap; a chain that is no
/// longer longer than ours by the time the round ends is dropped.
#[get("/nodes/resolve")]
pub async fn resolve_conflicts(state: web::Data<AppState>) -> HttpResponse {
    let local = state.ledger().chain().to_vec();
    let peers = state.peers.peers();

    let resolution = consensus::resolve(
        local,
        &peers,
        &*state.fetcher,
        state.config.validation,
    )
    .await;

    let (adopted, chain) = if resolution.adopted {
        let mut ledger = state.ledger();
        if resolution.chain.len() > ledger.len() {
            ledger.replace_chain(resolution.chain);
            state.cancel_mining();
            (true, ledger.chain().to_vec())
        } else {
            info!("consensus: local chain grew during the round, keeping it");
            (false, ledger.chain().to_vec())
        }
    } else {
        (false, resolution.chain)
    };

    let message = if adopted {
        "Our chain was replaced"
    } else {
        "Our chain is authoritative"
    };
    HttpResponse::Ok().json(ResolveResponse {
        message: message.to_string(),
        adopted,
        chain,
    })
}
