use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};

use crate::blockchain::{Block, CancelToken, Ledger};
use crate::config::Config;
use crate::network::{ChainFetcher, PeerAddress, PeerRegistry};
use crate::transaction::Transaction;

/// Shared node state: the ledger, known peers and how to reach them.
pub struct AppState {
    pub ledger: Mutex<Ledger>,
    pub peers: PeerRegistry,
    pub fetcher: Box<dyn ChainFetcher>,
    pub config: Config,
    /// Token handed to the proof search currently running, if any.
    mining_cancel: Mutex<CancelToken>,
}

impl AppState {
    pub fn new(config: Config, fetcher: Box<dyn ChainFetcher>) -> Self {
        let peers = PeerRegistry::new();
        for peer in &config.peers {
            peers.insert(peer.clone());
        }
        Self {
            ledger: Mutex::new(Ledger::new(config.node_id.clone())),
            peers,
            fetcher,
            config,
            mining_cancel: Mutex::new(CancelToken::new()),
        }
    }

    pub fn ledger(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock().expect("mutex poisoned")
    }

    pub fn mining_token(&self) -> CancelToken {
        self.mining_cancel.lock().expect("mutex poisoned").clone()
    }

    /// Abort searches started against the previous chain.
    pub fn cancel_mining(&self) {
        let mut current = self.mining_cancel.lock().expect("mutex poisoned");
        let stale = std::mem::take(&mut *current);
        stale.cancel();
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct MineResponse {
    pub message: String,
    pub index: u64,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

impl From<&Block> for MineResponse {
    fn from(block: &Block) -> Self {
        Self {
            message: "New Block Created".to_string(),
            index: block.index,
            transactions: block.transactions.clone(),
            proof: block.proof,
            previous_hash: block.previous_hash.clone(),
        }
    }
}

/* ---------- TX API Models ---------- */

#[derive(Deserialize)]
pub struct NewTxRequest {
    pub sender: String,
    pub recipient: String,
    pub amount: i64,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/* ---------- Nodes API Models ---------- */

#[derive(Deserialize)]
pub struct RegisterNodesRequest {
    pub nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct RegisterNodesResponse {
    pub message: String,
    pub total_nodes: Vec<PeerAddress>,
}

#[derive(Serialize)]
pub struct NodesResponse {
    pub nodes: Vec<PeerAddress>,
}

#[derive(Serialize)]
pub struct ResolveResponse {
    pub message: String,
    pub adopted: bool,
    pub chain: Vec<Block>,
}
