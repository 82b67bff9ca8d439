use thiserror::Error;

/// A peer address that could not be parsed at registration time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("invalid peer address '{address}': {reason}")]
    Invalid { address: String, reason: String },
}

impl AddressError {
    pub(crate) fn invalid(address: &str, reason: impl Into<String>) -> Self {
        AddressError::Invalid {
            address: address.to_string(),
            reason: reason.into(),
        }
    }
}

/// Why a peer's chain could not be obtained. Every variant means "skip this peer".
#[derive(Debug, Error)]
pub enum PeerError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("peer answered with HTTP status {0}")]
    Status(u16),
    #[error("malformed chain response: {0}")]
    Malformed(String),
}
