use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::{GENESIS_PREVIOUS_HASH, GENESIS_PROOF};
use crate::transaction::Transaction;

/// A single block in the chain holding the transactions sealed by one proof.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: f64, // Unix seconds (UTC), microsecond precision
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

impl Block {
    /// Create the genesis block (first block in the chain).
    pub fn genesis() -> Self {
        Self {
            index: 1,
            timestamp: now_secs(),
            transactions: Vec::new(),
            proof: GENESIS_PROOF,
            previous_hash: GENESIS_PREVIOUS_HASH.to_string(),
        }
    }

    /// Create a block stamped with the current time.
    pub fn new(
        index: u64,
        transactions: Vec<Transaction>,
        proof: u64,
        previous_hash: String,
    ) -> Self {
        Self {
            index,
            timestamp: now_secs(),
            transactions,
            proof,
            previous_hash,
        }
    }

    pub fn hash(&self) -> String {
        hash(self)
    }
}

/// SHA-256 digest (hex) of the block's canonical JSON encoding.
///
/// The block goes through `serde_json::Value` first: its object map is a
/// `BTreeMap`, so keys come out sorted at every level and the preimage does
/// not depend on how the struct declares its fields.
pub fn hash(block: &Block) -> String {
    let canonical = serde_json::to_value(block).expect("block serializes to JSON");
    let preimage = serde_json::to_vec(&canonical).expect("JSON value serializes");
    hex::encode(Sha256::digest(&preimage))
}

pub(crate) fn now_secs() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Block {
        Block {
            index: 2,
            timestamp: 1_700_000_000.25,
            transactions: vec![
                Transaction::new("a", "b", 10),
                Transaction::reward("node", 1),
            ],
            proof: 35_293,
            previous_hash: "abc".into(),
        }
    }

    #[test]
    fn genesis_uses_agreed_parameters() {
        let g = Block::genesis();
        assert_eq!(g.index, 1);
        assert_eq!(g.previous_hash, GENESIS_PREVIOUS_HASH);
        assert_eq!(g.proof, GENESIS_PROOF);
        assert!(g.transactions.is_empty());
    }

    #[test]
    fn hash_is_independent_of_field_order() {
        // Same field values assembled in a different key order.
        let shuffled = json!({
            "previous_hash": "abc",
            "proof": 35_293,
            "transactions": [
                { "amount": 10, "recipient": "b", "sender": "a" },
                { "recipient": "node", "sender": "0", "amount": 1 },
            ],
            "timestamp": 1_700_000_000.25,
            "index": 2,
        });
        let rebuilt: Block = serde_json::from_value(shuffled).unwrap();
        assert_eq!(hash(&rebuilt), hash(&sample()));
        assert_eq!(sample().hash(), hash(&sample()));
    }

    #[test]
    fn preimage_has_sorted_keys() {
        let value = serde_json::to_value(sample()).unwrap();
        let text = serde_json::to_string(&value).unwrap();
        assert!(text.starts_with(r#"{"index":2,"previous_hash":"abc","proof":35293,"timestamp""#));
        assert!(text.contains(r#"{"amount":10,"recipient":"b","sender":"a"}"#));
    }

    #[test]
    fn hash_changes_when_mutated() {
        let b = sample();
        let before = b.hash();
        let mut tampered = b.clone();
        tampered.transactions.push(Transaction::new("x", "y", 1));
        assert_ne!(before, tampered.hash());

        let mut tampered = b;
        tampered.proof += 1;
        assert_ne!(before, tampered.hash());
    }

    #[test]
    fn hash_survives_wire_round_trip() {
        let b = Block::genesis();
        let wire = serde_json::to_string(&b).unwrap();
        let back: Block = serde_json::from_str(&wire).unwrap();
        assert_eq!(b.hash(), back.hash());
        assert_eq!(b.hash().len(), 64);
    }
}
