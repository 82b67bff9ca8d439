use super::{Block, ProofOfWork, digest};

/// Check hash links and proofs across a whole chain.
///
/// `chain[0]` is taken as-is; every later block must point at the digest of
/// its predecessor and carry a proof valid against it. Stops at the first
/// violation. An empty chain is never valid.
pub fn is_valid_chain(chain: &[Block], pow: &ProofOfWork) -> bool {
    if chain.is_empty() {
        return false;
    }

    chain.windows(2).all(|pair| {
        let (prev, current) = (&pair[0], &pair[1]);
        let expected_prev_hash = digest(prev);
        current.previous_hash == expected_prev_hash
            && pow.is_valid(prev.proof, current.proof, &expected_prev_hash)
    })
}
