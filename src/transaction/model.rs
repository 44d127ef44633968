use serde::{Deserialize, Serialize};

/// Sender recorded on the mining credit; no real account uses it.
pub const REWARD_SENDER: &str = "0";

/// A value transfer waiting in the pending pool or sealed inside a block.
///
/// Transactions carry no id: they are identified by their position in the
/// pool or block, and identical transfers may appear more than once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub amount: i64,
}

impl Transaction {
    pub fn new(sender: impl Into<String>, recipient: impl Into<String>, amount: i64) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount,
        }
    }

    /// Mining credit paid to `node_id` for sealing a block.
    pub fn reward(node_id: &str, amount: i64) -> Self {
        Self::new(REWARD_SENDER, node_id, amount)
    }

    pub fn is_reward(&self) -> bool {
        self.sender == REWARD_SENDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reward_is_sent_by_zero() {
        let tx = Transaction::reward("node-a", 1);
        assert_eq!(tx.sender, "0");
        assert_eq!(tx.recipient, "node-a");
        assert_eq!(tx.amount, 1);
        assert!(tx.is_reward());
        assert!(!Transaction::new("a", "b", 10).is_reward());
    }

    #[test]
    fn serializes_with_wire_keys() {
        let json = serde_json::to_value(Transaction::new("a", "b", 10)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "sender": "a", "recipient": "b", "amount": 10 })
        );
    }

    #[test]
    fn rejects_fractional_amount() {
        let res = serde_json::from_str::<Transaction>(
            r#"{"sender":"a","recipient":"b","amount":1.5}"#,
        );
        assert!(res.is_err());
    }
}
