//! Transaction record and its operations

use crate::crypto;

/// A single value transfer between two named parties.
///
/// Transactions are immutable once created; the only field the chain ever
/// rewrites in place is `value`, during compression and bulk transforms.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Transaction {
    pub value: u64,
    pub sender: String,
    pub receiver: String,
}

impl Transaction {
    pub fn new(value: u64, sender: impl Into<String>, receiver: impl Into<String>) -> Self {
        Transaction {
            value,
            sender: sender.into(),
            receiver: receiver.into(),
        }
    }

    /// Renders the transaction in the ledger dump format.
    ///
    /// Three lines, no trailing newline; the caller adds separators:
    /// ```text
    /// Sender Name: <name>
    /// Receiver Name: <name>
    /// Transaction Value: <value>
    /// ```
    pub fn dump_info(&self) -> String {
        format!(
            "Sender Name: {}\nReceiver Name: {}\nTransaction Value: {}",
            self.sender, self.receiver, self.value
        )
    }

    /// Computes the printable digest of this transaction.
    pub fn hashed_message(&self) -> String {
        crypto::transaction_digest(self.value, &self.sender, &self.receiver)
    }

    /// Checks a given digest against this transaction.
    pub fn verify_hashed_message(&self, digest: &str) -> bool {
        crypto::verify_digest(self.value, &self.sender, &self.receiver, digest)
    }

    /// True when both transactions share the same sender and receiver.
    pub fn same_parties(&self, other: &Transaction) -> bool {
        self.sender == other.sender && self.receiver == other.receiver
    }
}
