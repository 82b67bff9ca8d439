use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A value transfer waiting in the pending buffer or committed to a block.
///
/// The ledger treats it as an opaque payload: nothing beyond the presence of
/// the three fields is checked. `amount` is any JSON number and is kept
/// exactly as received, so it hashes the same on every node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub amount: Number,
}

impl Transaction {
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: impl Into<Number>,
    ) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount: amount.into(),
        }
    }
}
