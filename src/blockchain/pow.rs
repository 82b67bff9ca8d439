use super::{DEFAULT_DIFFICULTY, MAX_DIFFICULTY};
use super::hasher::sha256_hex;

/// How many candidates are tried between two polls of the stop predicate.
const STOP_POLL_INTERVAL: u64 = 1024;

/// Brute-force Proof-of-Work over `sha256("{last_proof}{proof}{last_hash}")`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofOfWork {
    difficulty: usize,
}

impl Default for ProofOfWork {
    fn default() -> Self {
        Self::new(DEFAULT_DIFFICULTY)
    }
}

impl ProofOfWork {
    /// Difficulties above [`MAX_DIFFICULTY`] are clamped to it.
    pub fn new(difficulty: usize) -> Self {
        Self {
            difficulty: difficulty.min(MAX_DIFFICULTY),
        }
    }

    pub fn difficulty(&self) -> usize {
        self.difficulty
    }

    /// Return the smallest non-negative proof accepted by [`Self::is_valid`].
    ///
    /// Runs until a solution is found; there is no iteration cap.
    pub fn solve(&self, last_proof: u64, last_hash: &str) -> u64 {
        self.solve_interruptible(last_proof, last_hash, || false)
            .unwrap_or_default()
    }

    /// Same search as [`Self::solve`], but gives up with `None` once
    /// `should_stop` returns true. The predicate is polled every
    /// `STOP_POLL_INTERVAL` candidates.
    pub fn solve_interruptible<F>(&self, last_proof: u64, last_hash: &str, should_stop: F) -> Option<u64>
    where
        F: Fn() -> bool,
    {
        let mut candidate = 0u64;
        loop {
            if candidate % STOP_POLL_INTERVAL == 0 && should_stop() {
                return None;
            }
            if self.is_valid(last_proof, candidate, last_hash) {
                return Some(candidate);
            }
            candidate += 1;
        }
    }

    /// True iff the guess hash starts with `difficulty` zero hex characters.
    pub fn is_valid(&self, last_proof: u64, proof: u64, last_hash: &str) -> bool {
        let guess = format!("{last_proof}{proof}{last_hash}");
        sha256_hex(guess.as_bytes()).starts_with(&"0".repeat(self.difficulty))
    }
}
