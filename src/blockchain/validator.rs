use std::fmt;
use std::str::FromStr;

use super::{Block, GENESIS_PREVIOUS_HASH, GENESIS_PROOF, InvalidChain, pow};

/// Which rule set a candidate chain is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validation {
    /// Hash linkage and proof-of-work of every adjacent pair.
    Baseline,
    /// Baseline plus genesis parameters, contiguous indices and
    /// non-decreasing timestamps.
    #[default]
    Strict,
}

impl Validation {
    pub fn check(self, chain: &[Block]) -> Result<(), InvalidChain> {
        match self {
            Validation::Baseline => validate(chain),
            Validation::Strict => validate_strict(chain),
        }
    }
}

impl FromStr for Validation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "baseline" => Ok(Validation::Baseline),
            "strict" => Ok(Validation::Strict),
            other => Err(format!("unknown validation mode `{other}`")),
        }
    }
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validation::Baseline => f.write_str("baseline"),
            Validation::Strict => f.write_str("strict"),
        }
    }
}

/// Check hash linkage and proof-of-work for every adjacent pair.
///
/// Chains with fewer than two blocks have no pairs and are valid.
pub fn validate(chain: &[Block]) -> Result<(), InvalidChain> {
    for pair in chain.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);

        if curr.previous_hash != prev.hash() {
            return Err(InvalidChain::BrokenLink { index: curr.index });
        }
        if !pow::verify(prev.proof, curr.proof) {
            return Err(InvalidChain::BadProof { index: curr.index });
        }
    }
    Ok(())
}

pub fn is_valid(chain: &[Block]) -> bool {
    validate(chain).is_ok()
}

/// [`validate`] plus the structural checks the baseline leaves out.
pub fn validate_strict(chain: &[Block]) -> Result<(), InvalidChain> {
    let genesis = chain.first().ok_or(InvalidChain::Empty)?;
    if genesis.index != 1
        || genesis.previous_hash != GENESIS_PREVIOUS_HASH
        || genesis.proof != GENESIS_PROOF
    {
        return Err(InvalidChain::BadGenesis);
    }

    for (position, pair) in chain.windows(2).enumerate() {
        let (prev, curr) = (&pair[0], &pair[1]);
        let expected = prev.index + 1;
        if curr.index != expected {
            return Err(InvalidChain::IndexGap {
                position: position + 1,
                expected,
                found: curr.index,
            });
        }
        if curr.timestamp < prev.timestamp {
            return Err(InvalidChain::TimestampRegression { index: curr.index });
        }
    }

    validate(chain)
}
