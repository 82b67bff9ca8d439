//! Canonical block hashing.
//!
//! A block is first lowered to a `serde_json::Value`. Objects in a `Value`
//! are backed by a sorted map, so the bytes fed to SHA-256 list every key in
//! lexicographic order no matter how the struct declares its fields. Two
//! nodes holding equal blocks therefore always agree on the digest.

use sha2::{Digest, Sha256};

use super::Block;

/// Lowercase hex SHA-256 of the block's canonical JSON encoding.
pub fn digest(block: &Block) -> String {
    let value = serde_json::to_value(block).expect("block serializes to json");
    let bytes = serde_json::to_vec(&value).expect("json value serializes");
    sha256_hex(&bytes)
}

pub(crate) fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
