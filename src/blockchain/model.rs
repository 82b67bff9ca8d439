use serde_json::Number;

use super::{Block, LedgerError, ProofOfWork, is_valid_chain};
use crate::transaction::Transaction;

/// In-memory ledger: the ordered chain plus the pending-transaction buffer.
///
/// The ledger trusts its callers. `append` does not check the proof or the
/// hash link it is handed; chains from elsewhere go through
/// [`is_valid_chain`] before reaching `replace`.
#[derive(Debug)]
pub struct Blockchain {
    chain: Vec<Block>,
    pending: Vec<Transaction>,
}

impl Default for Blockchain {
    fn default() -> Self {
        Self::new()
    }
}

impl Blockchain {
    /// Initialize a new ledger holding only the genesis block.
    pub fn new() -> Self {
        Self {
            chain: vec![Block::genesis()],
            pending: Vec::new(),
        }
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> Result<&Block, LedgerError> {
        self.chain.last().ok_or(LedgerError::Empty)
    }

    /// Seal the pending buffer into a new block on top of the chain.
    ///
    /// The buffer is drained here, so anything submitted before this call
    /// (including during the proof search) lands in the new block.
    pub fn append(&mut self, proof: u64, previous_hash: String) -> Result<&Block, LedgerError> {
        let index = self.last_block()?.index + 1;
        let transactions = std::mem::take(&mut self.pending);
        self.chain
            .push(Block::new(index, transactions, proof, previous_hash));
        self.last_block()
    }

    /// Buffer a transaction; returns the index of the block expected to include it.
    pub fn submit_transaction(
        &mut self,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: impl Into<Number>,
    ) -> Result<u64, LedgerError> {
        let next_index = self.last_block()?.index + 1;
        self.pending
            .push(Transaction::new(sender, recipient, amount));
        Ok(next_index)
    }

    /// Owned copy of the full chain.
    pub fn snapshot(&self) -> Vec<Block> {
        self.chain.clone()
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    /// Swap in another chain wholesale. The pending buffer is left alone.
    pub fn replace(&mut self, chain: Vec<Block>) -> Result<(), LedgerError> {
        if chain.is_empty() {
            return Err(LedgerError::Empty);
        }
        self.chain = chain;
        Ok(())
    }

    /// Validate the local chain: linkage and PoW.
    pub fn is_valid_chain(&self, pow: &ProofOfWork) -> bool {
        is_valid_chain(&self.chain, pow)
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }
}
