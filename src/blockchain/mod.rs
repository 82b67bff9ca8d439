pub mod block;
pub mod error;
pub mod hasher;
pub mod model;
pub mod pow;
pub mod validator;

#[cfg(test)]
pub(crate) mod testing;

pub use block::Block;
pub use error::LedgerError;
pub use hasher::digest;
pub use model::Blockchain;
pub use pow::ProofOfWork;
pub use validator::is_valid_chain;

/// Default Proof-of-Work difficulty (number of leading zero hex characters).
pub const DEFAULT_DIFFICULTY: usize = 4;

/// Hex characters in a SHA-256 digest; no difficulty above this can be met.
pub const MAX_DIFFICULTY: usize = 64;

/// `previous_hash` of the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// Proof stored in the genesis block.
pub const GENESIS_PROOF: u64 = 100;

/// Sender recorded on system-issued reward transactions.
pub const REWARD_SENDER: &str = "0";

/// Amount credited to the miner for each sealed block.
pub const MINING_REWARD: u64 = 1;
