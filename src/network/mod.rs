pub mod client;
pub mod error;
pub mod peer;

pub use client::{HttpPeerClient, PeerChain, PeerChainProvider};
pub use error::{AddressError, PeerError};
pub use peer::{NodeRegistry, PeerAddress};
