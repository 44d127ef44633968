use thiserror::Error;

/// Why a candidate chain was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidChain {
    #[error("chain is empty")]
    Empty,

    #[error("genesis block does not carry the agreed parameters")]
    BadGenesis,

    #[error("block {index} does not link to the hash of its predecessor")]
    BrokenLink { index: u64 },

    #[error("block {index} carries a proof that does not solve its predecessor's puzzle")]
    BadProof { index: u64 },

    #[error("block at position {position} has index {found}, expected {expected}")]
    IndexGap {
        position: usize,
        expected: u64,
        found: u64,
    },

    #[error("block {index} is timestamped before its predecessor")]
    TimestampRegression { index: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("chain tip moved since the mining job was taken")]
    StaleTip,

    #[error("proof {proof} does not solve the puzzle for last proof {last_proof}")]
    InvalidProof { last_proof: u64, proof: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("proof search was cancelled")]
    Cancelled,

    #[error("proof search ran past its deadline")]
    DeadlineExceeded,
}
