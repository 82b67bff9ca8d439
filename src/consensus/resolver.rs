//! Longest-valid-chain conflict resolution.
//!
//! Chains are compared by block count only. A peer's chain is adopted when
//! it passes validation and is strictly longer than everything seen so far,
//! the local chain included. Ties never replace.

use log::{debug, info, warn};

use crate::blockchain::{Block, Blockchain, LedgerError, ProofOfWork, is_valid_chain};
use crate::network::{PeerAddress, PeerChainProvider};

#[derive(Debug, Clone, Copy)]
pub struct LongestChainResolver<'a> {
    pow: &'a ProofOfWork,
}

impl<'a> LongestChainResolver<'a> {
    pub fn new(pow: &'a ProofOfWork) -> Self {
        Self { pow }
    }

    /// Poll every peer and return the longest valid chain strictly longer
    /// than `local_len`, if any. Unreachable peers, malformed answers and
    /// invalid chains are skipped.
    pub fn best_candidate<P: PeerChainProvider>(
        &self,
        local_len: usize,
        peers: &[PeerAddress],
        provider: &P,
    ) -> Option<Vec<Block>> {
        let mut best_len = local_len;
        let mut best: Option<Vec<Block>> = None;

        for peer in peers {
            let candidate = match provider.fetch_chain(peer) {
                Ok(c) => c,
                Err(e) => {
                    warn!("RESOLVE - skipping peer {peer}: {e}");
                    continue;
                }
            };

            if candidate.length <= best_len {
                debug!(
                    "RESOLVE - peer {peer} length {} not longer than {best_len}",
                    candidate.length
                );
                continue;
            }
            if !is_valid_chain(&candidate.chain, self.pow) {
                warn!("RESOLVE - peer {peer} sent an invalid chain, skipping");
                continue;
            }

            best_len = candidate.length;
            best = Some(candidate.chain);
        }

        best
    }

    /// Install `candidate` if it is still strictly longer than `ledger`'s
    /// chain. The ledger may have grown since the candidate was chosen, so
    /// the comparison is repeated against its current length. Returns true
    /// iff the chain was replaced.
    pub fn adopt(
        &self,
        ledger: &mut Blockchain,
        candidate: Vec<Block>,
    ) -> Result<bool, LedgerError> {
        let (new_len, local_len) = (candidate.len(), ledger.len());
        if new_len <= local_len {
            debug!("RESOLVE - candidate of length {new_len} no longer beats local {local_len}");
            return Ok(false);
        }
        ledger.replace(candidate)?;
        info!("RESOLVE - adopted peer chain of length {new_len}");
        Ok(true)
    }
}
