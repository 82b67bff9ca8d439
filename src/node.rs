//! The engine a transport drives: mining, transactions, peers, resolution.
//!
//! Every chain mutation (an append from mining or a replace from
//! resolution) happens under the single ledger lock. The proof search and
//! the peer polling run with the lock released. A tip epoch, bumped on each
//! mutation, lets an in-flight search notice that the block it is working
//! on top of is gone and give up.

use log::{debug, info};
use serde_json::Number;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use thiserror::Error;

use crate::blockchain::{
    Block, Blockchain, LedgerError, MINING_REWARD, ProofOfWork, REWARD_SENDER, digest,
};
use crate::config::Config;
use crate::consensus::LongestChainResolver;
use crate::network::{
    AddressError, HttpPeerClient, NodeRegistry, PeerAddress, PeerChainProvider, PeerError,
};
use crate::transaction::Transaction;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Address(#[from] AddressError),
    #[error(transparent)]
    Peer(#[from] PeerError),
    #[error("chain tip changed while mining; block discarded")]
    StaleTip,
    #[error("node state lock poisoned")]
    LockPoisoned,
}

pub struct Node {
    id: String,
    pow: ProofOfWork,
    ledger: Mutex<Blockchain>,
    registry: Mutex<NodeRegistry>,
    tip_epoch: AtomicU64,
    peer_timeout: Duration,
    chain_path: String,
}

impl Node {
    pub fn new(id: impl Into<String>, pow: ProofOfWork) -> Self {
        Self {
            id: id.into(),
            pow,
            ledger: Mutex::new(Blockchain::new()),
            registry: Mutex::new(NodeRegistry::new()),
            tip_epoch: AtomicU64::new(0),
            peer_timeout: Duration::from_secs(5),
            chain_path: "/api/v1/chain/".to_string(),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        let mut node = Self::new(cfg.node_id.clone(), ProofOfWork::new(cfg.difficulty));
        node.peer_timeout = cfg.peer_timeout;
        node.chain_path = cfg.chain_path.clone();
        node
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn pow(&self) -> &ProofOfWork {
        &self.pow
    }

    fn ledger(&self) -> Result<MutexGuard<'_, Blockchain>, NodeError> {
        self.ledger.lock().map_err(|_| NodeError::LockPoisoned)
    }

    fn registry(&self) -> Result<MutexGuard<'_, NodeRegistry>, NodeError> {
        self.registry.lock().map_err(|_| NodeError::LockPoisoned)
    }

    /// Solve the next proof, credit the mining reward, and append the block.
    ///
    /// Blocks the calling thread for the whole search. Fails with
    /// [`NodeError::StaleTip`] if another append or a replace landed first.
    pub fn mine(&self) -> Result<Block, NodeError> {
        let (last_proof, last_hash, epoch) = {
            let ledger = self.ledger()?;
            let last = ledger.last_block()?;
            (
                last.proof,
                digest(last),
                self.tip_epoch.load(Ordering::SeqCst),
            )
        };

        debug!("MINER - searching on top of {last_hash} (proof={last_proof})");
        let proof = self
            .pow
            .solve_interruptible(last_proof, &last_hash, || {
                self.tip_epoch.load(Ordering::SeqCst) != epoch
            })
            .ok_or(NodeError::StaleTip)?;

        let mut ledger = self.ledger()?;
        if self.tip_epoch.load(Ordering::SeqCst) != epoch {
            return Err(NodeError::StaleTip);
        }
        ledger.submit_transaction(REWARD_SENDER, self.id.as_str(), MINING_REWARD)?;
        let block = ledger.append(proof, last_hash)?.clone();
        self.tip_epoch.fetch_add(1, Ordering::SeqCst);

        info!(
            "MINER - sealed block #{} (proof={}, txs={})",
            block.index,
            block.proof,
            block.transactions.len()
        );
        Ok(block)
    }

    pub fn submit_transaction(
        &self,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: impl Into<Number>,
    ) -> Result<u64, NodeError> {
        Ok(self
            .ledger()?
            .submit_transaction(sender, recipient, amount)?)
    }

    /// Snapshot of the chain and its length.
    pub fn chain(&self) -> Result<(Vec<Block>, usize), NodeError> {
        let ledger = self.ledger()?;
        Ok((ledger.snapshot(), ledger.len()))
    }

    pub fn pending(&self) -> Result<Vec<Transaction>, NodeError> {
        Ok(self.ledger()?.pending().to_vec())
    }

    pub fn is_chain_valid(&self) -> Result<bool, NodeError> {
        Ok(self.ledger()?.is_valid_chain(&self.pow))
    }

    pub fn register_peer(&self, address: &str) -> Result<PeerAddress, NodeError> {
        Ok(self.registry()?.register(address)?)
    }

    pub fn peers(&self) -> Result<Vec<PeerAddress>, NodeError> {
        Ok(self.registry()?.peers())
    }

    /// Resolve against all registered peers over HTTP.
    ///
    /// Blocking; call from a worker thread, never from the async executor.
    pub fn resolve(&self) -> Result<bool, NodeError> {
        let client = HttpPeerClient::new(self.peer_timeout, self.chain_path.clone())?;
        self.resolve_with(&client)
    }

    /// Resolve using the given provider. Returns true iff the local chain
    /// was replaced.
    pub fn resolve_with<P: PeerChainProvider>(&self, provider: &P) -> Result<bool, NodeError> {
        let peers = self.peers()?;
        let local_len = self.ledger()?.len();

        let resolver = LongestChainResolver::new(&self.pow);
        let Some(candidate) = resolver.best_candidate(local_len, &peers, provider) else {
            return Ok(false);
        };

        let mut ledger = self.ledger()?;
        let replaced = resolver.adopt(&mut ledger, candidate)?;
        if replaced {
            self.tip_epoch.fetch_add(1, Ordering::SeqCst);
        }
        Ok(replaced)
    }
}

#[cfg(test)]
mod tests {
    use super::{Node, NodeError};
    use crate::blockchain::testing::mined_chain;
    use crate::blockchain::{MINING_REWARD, ProofOfWork, REWARD_SENDER, digest};
    use crate::consensus::resolver::tests::FakePeers;
    use crate::network::AddressError;
    use crate::transaction::Transaction;
    use std::sync::Arc;
    use std::sync::atomic::Ordering;
    use std::thread;
    use std::time::Duration;

    fn node(difficulty: usize) -> Node {
        Node::new("miner-1", ProofOfWork::new(difficulty))
    }

    #[test]
    fn mine_credits_reward_after_pending() {
        let n = node(2);
        assert_eq!(n.submit_transaction("alice", "bob", 5).unwrap(), 2);
        assert_eq!(n.submit_transaction("bob", "carol", 1).unwrap(), 2);

        let block = n.mine().unwrap();

        assert_eq!(block.index, 2);
        assert_eq!(
            block.transactions,
            vec![
                Transaction::new("alice", "bob", 5),
                Transaction::new("bob", "carol", 1),
                Transaction::new(REWARD_SENDER, "miner-1", MINING_REWARD),
            ]
        );
        assert!(n.pending().unwrap().is_empty());
    }

    #[test]
    fn mined_chain_stays_valid() {
        let n = node(2);
        for _ in 0..3 {
            n.mine().unwrap();
        }
        let (chain, len) = n.chain().unwrap();
        assert_eq!(len, 4);
        assert_eq!(chain[3].previous_hash, digest(&chain[2]));
        assert!(n.is_chain_valid().unwrap());
    }

    #[test]
    fn register_rejects_only_bad_address() {
        let n = node(1);
        n.register_peer("http://127.0.0.1:5001").unwrap();
        let err = n.register_peer("::not valid::").unwrap_err();
        assert!(matches!(err, NodeError::Address(AddressError::Invalid { .. })));
        n.register_peer("127.0.0.1:5002").unwrap();
        assert_eq!(n.peers().unwrap().len(), 2);
    }

    #[test]
    fn resolve_adopts_longer_chain_and_keeps_pending() {
        let pow = ProofOfWork::new(2);
        let n = Node::new("miner-1", pow);
        n.mine().unwrap();
        n.mine().unwrap();
        n.submit_transaction("alice", "bob", 3).unwrap();
        n.register_peer("10.0.0.1:5000").unwrap();

        let remote = mined_chain(&pow, 5);
        let net = FakePeers::default().with("10.0.0.1:5000", remote.clone());

        assert!(n.resolve_with(&net).unwrap());
        assert_eq!(n.chain().unwrap().0, remote);
        assert_eq!(n.pending().unwrap(), vec![Transaction::new("alice", "bob", 3)]);

        // Next mined block extends the adopted chain.
        let block = n.mine().unwrap();
        assert_eq!(block.index, 6);
        assert!(n.is_chain_valid().unwrap());
    }

    #[test]
    fn resolve_keeps_equal_length_chain() {
        let pow = ProofOfWork::new(2);
        let n = Node::new("miner-1", pow);
        n.mine().unwrap();
        n.mine().unwrap();
        let before = n.chain().unwrap().0;
        n.register_peer("10.0.0.1:5000").unwrap();
        let net = FakePeers::default().with("10.0.0.1:5000", mined_chain(&pow, 3));

        assert!(!n.resolve_with(&net).unwrap());
        assert_eq!(n.chain().unwrap().0, before);
    }

    #[test]
    fn resolve_with_unreachable_peers_is_not_an_error() {
        let n = node(1);
        n.register_peer("10.0.0.1:5000").unwrap();
        assert!(!n.resolve_with(&FakePeers::default()).unwrap());
    }

    #[test]
    fn replace_during_search_aborts_mining() {
        // Difficulty high enough that the search cannot finish on its own.
        let n = Arc::new(node(64));
        let miner = {
            let n = Arc::clone(&n);
            thread::spawn(move || n.mine())
        };
        while !miner.is_finished() {
            n.tip_epoch.fetch_add(1, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(10));
        }

        let res = miner.join().expect("miner thread panicked");
        assert!(matches!(res, Err(NodeError::StaleTip)));
        assert_eq!(n.chain().unwrap().1, 1);
    }
}
