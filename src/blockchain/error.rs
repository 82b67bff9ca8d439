use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The ledger holds no blocks (or an empty chain was offered as a replacement).
    #[error("ledger has no blocks")]
    Empty,
}
