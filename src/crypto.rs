//! Hashing primitives for LedgerChain

use sha2::{Digest, Sha256};

/// Computes the printable digest of a transaction triple.
///
/// The digest is the hex-encoded SHA-256 of a length-prefixed encoding of
/// (value, sender, receiver). Length prefixes keep adjacent string fields
/// from running into each other, so ("ab", "c") and ("a", "bc") hash apart.
/// The encoding is fixed, which makes digests stable across runs and
/// processes.
pub fn transaction_digest(value: u64, sender: &str, receiver: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.to_le_bytes());
    hasher.update((sender.len() as u64).to_le_bytes());
    hasher.update(sender.as_bytes());
    hasher.update((receiver.len() as u64).to_le_bytes());
    hasher.update(receiver.as_bytes());
    hex::encode(hasher.finalize())
}

/// Checks a candidate digest against a freshly computed one.
pub fn verify_digest(value: u64, sender: &str, receiver: &str, digest: &str) -> bool {
    transaction_digest(value, sender, receiver) == digest
}
