use actix_web::http::Uri;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::AddressError;

const DEFAULT_PORT: u16 = 80;

/// A validated peer location.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PeerAddress {
    pub host: String,
    pub port: u16,
}

impl PeerAddress {
    /// Base URL used when talking to this peer over HTTP.
    pub fn base_url(&self) -> String {
        format!("http://{self}")
    }
}

impl fmt::Display for PeerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Accepts `scheme://host[:port][/path]` or a bare `host[:port]`.
impl FromStr for PeerAddress {
    type Err = AddressError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AddressError::invalid(raw, "empty address"));
        }

        let uri: Uri = trimmed
            .parse()
            .map_err(|e| AddressError::invalid(raw, format!("{e}")))?;
        let authority = uri
            .authority()
            .ok_or_else(|| AddressError::invalid(raw, "missing host"))?;

        let host = authority.host();
        if host.is_empty() {
            return Err(AddressError::invalid(raw, "missing host"));
        }
        // Userinfo aside, the authority is the host optionally followed by
        // `:port`; anything past the host is port text that must parse.
        let host_and_port = authority
            .as_str()
            .rsplit_once('@')
            .map_or(authority.as_str(), |(_, rest)| rest);
        let port = match authority.port() {
            Some(p) => p.as_u16(),
            None if host_and_port.len() > host.len() => {
                return Err(AddressError::invalid(
                    raw,
                    format!("invalid port '{}'", &host_and_port[host.len()..]),
                ));
            }
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: host.to_string(),
            port,
        })
    }
}

/// Set of known peers, iterated in a stable order.
#[derive(Debug, Default)]
pub struct NodeRegistry {
    peers: BTreeSet<PeerAddress>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and remember a peer. Registering the same peer twice is a no-op.
    pub fn register(&mut self, raw: &str) -> Result<PeerAddress, AddressError> {
        let addr: PeerAddress = raw.parse()?;
        self.peers.insert(addr.clone());
        Ok(addr)
    }

    pub fn peers(&self) -> Vec<PeerAddress> {
        self.peers.iter().cloned().collect()
    }
}
