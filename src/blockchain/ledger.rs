use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::{Block, LedgerError, MINING_REWARD, pow};
use crate::transaction::Transaction;

/// The tip a proof search extends, captured so the result can be sealed
/// later without holding the ledger for the duration of the search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiningJob {
    pub index: u64,
    pub last_proof: u64,
    pub previous_hash: String,
}

/// Full chain plus its length, as served to clients and peers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainSnapshot {
    pub chain: Vec<Block>,
    pub length: usize,
}

/// In-memory chain and pending pool of a single node.
///
/// Invariants:
/// - The chain always holds at least the genesis block.
/// - A transaction leaves `pending` only by being sealed into exactly one block.
#[derive(Debug, Clone)]
pub struct Ledger {
    chain: Vec<Block>,
    pending: Vec<Transaction>,
    node_id: String,
}

impl Ledger {
    /// Start a ledger holding only a fresh genesis block.
    pub fn new(node_id: impl Into<String>) -> Self {
        Self {
            chain: vec![Block::genesis()],
            pending: Vec::new(),
            node_id: node_id.into(),
        }
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("ledger always holds at least the genesis block")
    }

    /// Queue a transaction; returns the index of the block that will hold it.
    pub fn submit_transaction(
        &mut self,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: i64,
    ) -> u64 {
        self.pending.push(Transaction::new(sender, recipient, amount));
        debug!("pending pool now holds {} transaction(s)", self.pending.len());
        self.next_index()
    }

    pub fn mining_job(&self) -> MiningJob {
        let last = self.last_block();
        MiningJob {
            index: self.next_index(),
            last_proof: last.proof,
            previous_hash: last.hash(),
        }
    }

    /// Append a block for `proof` if it still extends the tip `job` was
    /// taken from. Nothing changes on error.
    pub fn seal(&mut self, job: &MiningJob, proof: u64) -> Result<&Block, LedgerError> {
        if job.index != self.next_index() || job.previous_hash != self.last_block().hash() {
            return Err(LedgerError::StaleTip);
        }
        if !pow::verify(job.last_proof, proof) {
            return Err(LedgerError::InvalidProof {
                last_proof: job.last_proof,
                proof,
            });
        }
        Ok(self.append_block(proof, job.previous_hash.clone()))
    }

    /// Solve the puzzle for the current tip and seal a block.
    /// Blocks the caller for the whole search.
    pub fn mine(&mut self) -> &Block {
        let job = self.mining_job();
        let proof = pow::solve(job.last_proof);
        self.append_block(proof, job.previous_hash)
    }

    pub fn snapshot(&self) -> ChainSnapshot {
        ChainSnapshot {
            chain: self.chain.clone(),
            length: self.chain.len(),
        }
    }

    /// Swap the whole chain for one consensus has already validated.
    /// Pending transactions are kept as they are.
    pub fn replace_chain(&mut self, chain: Vec<Block>) {
        if chain.is_empty() {
            warn!("refusing to replace chain with an empty one");
            return;
        }
        info!(
            "chain replaced: {} -> {} blocks ({} pending kept)",
            self.chain.len(),
            chain.len(),
            self.pending.len()
        );
        self.chain = chain;
    }

    fn next_index(&self) -> u64 {
        self.chain.len() as u64 + 1
    }

    fn append_block(&mut self, proof: u64, previous_hash: String) -> &Block {
        self.pending
            .push(Transaction::reward(&self.node_id, MINING_REWARD));
        let transactions = std::mem::take(&mut self.pending);
        let mut block = Block::new(self.next_index(), transactions, proof, previous_hash);
        // Never older than the tip, even after adopting a chain stamped by a
        // peer whose clock runs ahead of ours.
        block.timestamp = block.timestamp.max(self.last_block().timestamp);
        debug!(
            "sealed block #{} (proof={}, txs={})",
            block.index,
            block.proof,
            block.transactions.len()
        );
        self.chain.push(block);
        self.last_block()
    }
}
