use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use super::{DIFFICULTY, SolveError};

/// Number of guesses between two checks of the cancel token and deadline.
pub const POLL_INTERVAL: u64 = 4096;

/// Shared flag used to abandon a proof search from another thread.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Cancels the token when the returned guard is dropped.
    pub fn drop_guard(&self) -> DropGuard {
        DropGuard(self.clone())
    }
}

#[derive(Debug)]
pub struct DropGuard(CancelToken);

impl Drop for DropGuard {
    fn drop(&mut self) {
        self.0.cancel();
    }
}

/// Optional bounds on a proof search. Any cancelled token stops it.
#[derive(Debug, Clone, Default)]
pub struct SolveLimits {
    pub cancel: Vec<CancelToken>,
    pub deadline: Option<Instant>,
}

impl SolveLimits {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel.push(token);
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    fn check(&self) -> Result<(), SolveError> {
        if self.cancel.iter().any(CancelToken::is_cancelled) {
            return Err(SolveError::Cancelled);
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Err(SolveError::DeadlineExceeded);
        }
        Ok(())
    }
}

/// Hex SHA-256 of the decimal concatenation `"{last_proof}{proof}"`.
///
/// Every node must encode the pair exactly like this or proofs stop being
/// verifiable across the network.
pub fn guess_hash(last_proof: u64, proof: u64) -> String {
    let guess = format!("{last_proof}{proof}");
    hex::encode(Sha256::digest(guess.as_bytes()))
}

/// Whether `proof` solves the puzzle posed by `last_proof`.
pub fn verify(last_proof: u64, proof: u64) -> bool {
    let digest = guess_hash(last_proof, proof);
    digest.bytes().take(DIFFICULTY).all(|c| c == b'0')
}

/// Smallest proof solving the puzzle for `last_proof`. Blocks until found.
pub fn solve(last_proof: u64) -> u64 {
    (0..=u64::MAX)
        .find(|&proof| verify(last_proof, proof))
        .expect("proof space exhausted")
}

/// Same search as [`solve`], giving up when `limits` says so.
pub fn solve_with(last_proof: u64, limits: &SolveLimits) -> Result<u64, SolveError> {
    let mut proof = 0u64;
    loop {
        if proof % POLL_INTERVAL == 0 {
            limits.check()?;
        }
        if verify(last_proof, proof) {
            return Ok(proof);
        }
        proof += 1;
    }
}
