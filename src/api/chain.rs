use actix_web::{HttpResponse, get, web};
use log::{debug, info, warn};
use std::time::Instant;

use super::error::ApiError;
use super::models::{AppState, MineResponse};
use crate::blockchain::{CancelToken, LedgerError, SolveError, SolveLimits, pow};

/// Get the full chain and its length.
#[get("/chain")]
pub async fn get_chain(state: web::Data<AppState>) -> HttpResponse {
    let snapshot = state.ledger().snapshot();
    HttpResponse::Ok().json(snapshot)
}

/// Mine a block over the pending pool:
/// - take a mining job for the current tip
/// - search for the proof on the blocking pool, without the ledger lock
/// - seal the block (reward + pending) if the tip has not moved
///
/// A stale tip or a search cancelled by a chain replacement starts over.
/// Dropping the request (client gone) stops the search on the blocking pool.
#[get("/mine")]
pub async fn mine_block(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let deadline = state
        .config
        .mining_deadline
        .map(|timeout| (timeout, Instant::now() + timeout));
    let abandoned = CancelToken::new();
    let _abandon_on_drop = abandoned.drop_guard();

    loop {
        let job = state.ledger().mining_job();
        let mut limits = SolveLimits::unbounded()
            .with_cancel(state.mining_token())
            .with_cancel(abandoned.clone());
        if let Some((_, at)) = deadline {
            limits = limits.with_deadline(at);
        }

        debug!(
            "MINER - searching proof for block #{} (last_proof={})",
            job.index, job.last_proof
        );
        let last_proof = job.last_proof;
        let outcome = web::block(move || pow::solve_with(last_proof, &limits))
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        let proof = match outcome {
            Ok(proof) => proof,
            Err(SolveError::Cancelled) => {
                debug!("MINER - chain replaced during search, restarting");
                continue;
            }
            Err(SolveError::DeadlineExceeded) => {
                let timeout = deadline.map(|(timeout, _)| timeout).unwrap_or_default();
                warn!("MINER - no proof for block #{} within {timeout:?}", job.index);
                return Err(ApiError::MiningTimeout(timeout));
            }
        };

        let mut ledger = state.ledger();
        match ledger.seal(&job, proof) {
            Ok(block) => {
                info!(
                    "MINER - sealed block #{} (proof={}, txs={})",
                    block.index,
                    block.proof,
                    block.transactions.len()
                );
                return Ok(HttpResponse::Ok().json(MineResponse::from(block)));
            }
            Err(LedgerError::StaleTip) => {
                debug!("MINER - tip moved while searching, restarting");
            }
            Err(err) => return Err(ApiError::Internal(err.to_string())),
        }
    }
}
