//! Chain-building helpers shared by unit tests.

use super::{Block, Blockchain, ProofOfWork, digest};

/// Solve and append one block on top of `bc`, the way a miner would.
pub(crate) fn mine_next(bc: &mut Blockchain, pow: &ProofOfWork) -> Block {
    let last = bc.last_block().expect("ledger has genesis").clone();
    let last_hash = digest(&last);
    let proof = pow.solve(last.proof, &last_hash);
    bc.append(proof, last_hash)
        .expect("ledger has genesis")
        .clone()
}

/// A valid chain of `len` blocks; every non-genesis block holds one transaction.
pub(crate) fn mined_chain(pow: &ProofOfWork, len: usize) -> Vec<Block> {
    let mut bc = Blockchain::new();
    for i in 1..len {
        bc.submit_transaction("alice", "bob", i as u64)
            .expect("ledger has genesis");
        mine_next(&mut bc, pow);
    }
    bc.snapshot()
}
