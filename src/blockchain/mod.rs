pub mod block;
pub mod error;
pub mod ledger;
pub mod pow;
pub mod validator;

pub use block::{Block, hash};
pub use error::{InvalidChain, LedgerError, SolveError};
pub use ledger::{ChainSnapshot, Ledger, MiningJob};
pub use pow::{CancelToken, SolveLimits};
pub use validator::Validation;

/// Proof-of-Work difficulty (number of leading zero hex digits).
pub const DIFFICULTY: usize = 4;

/// Amount credited to the node that seals a block.
pub const MINING_REWARD: i64 = 1;

/// `previous_hash` of the genesis block. Not a digest.
pub const GENESIS_PREVIOUS_HASH: &str = "1";

/// Proof stored in the genesis block; every node must agree on it.
pub const GENESIS_PROOF: u64 = 100;
