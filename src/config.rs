use log::warn;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

use crate::blockchain::{DEFAULT_DIFFICULTY, MAX_DIFFICULTY};

/// Node settings, read from the environment (optionally seeded by `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub difficulty: usize,
    pub node_id: String,
    pub peer_timeout: Duration,
    pub chain_path: String,
    pub peers: Vec<String>,
    /// Zero disables periodic resolution.
    pub resolve_interval: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup; unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = parse_or(&lookup, "PORT", 8080u16);
        let mut difficulty = parse_or(&lookup, "DIFFICULTY", DEFAULT_DIFFICULTY);
        if difficulty > MAX_DIFFICULTY {
            warn!(
                "CONFIG - DIFFICULTY={difficulty} exceeds {MAX_DIFFICULTY}, using {DEFAULT_DIFFICULTY}"
            );
            difficulty = DEFAULT_DIFFICULTY;
        }
        let node_id = lookup("NODE_ID")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().simple().to_string());
        let peer_timeout = Duration::from_secs(parse_or(&lookup, "PEER_TIMEOUT_SECS", 5u64));
        let chain_path = lookup("CHAIN_PATH").unwrap_or_else(|| "/api/v1/chain/".to_string());
        let peers = lookup("PEERS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();
        let resolve_interval =
            Duration::from_secs(parse_or(&lookup, "RESOLVE_INTERVAL_SECS", 0u64));

        Self {
            host,
            port,
            difficulty,
            node_id,
            peer_timeout,
            chain_path,
            peers,
            resolve_interval,
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy + std::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("CONFIG - {key}={raw:?} is not valid, using {default}");
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use std::collections::HashMap;
    use std::time::Duration;

    fn config(pairs: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = config(&[]);
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.difficulty, 4);
        assert_eq!(cfg.node_id.len(), 32);
        assert!(!cfg.node_id.contains('-'));
        assert_eq!(cfg.peer_timeout, Duration::from_secs(5));
        assert_eq!(cfg.chain_path, "/api/v1/chain/");
        assert!(cfg.peers.is_empty());
        assert_eq!(cfg.resolve_interval, Duration::ZERO);
    }

    #[test]
    fn reads_overrides() {
        let cfg = config(&[
            ("PORT", "5001"),
            ("DIFFICULTY", "3"),
            ("NODE_ID", "miner-1"),
            ("PEERS", "127.0.0.1:5002, http://127.0.0.1:5003 ,"),
            ("RESOLVE_INTERVAL_SECS", "30"),
        ]);
        assert_eq!(cfg.port, 5001);
        assert_eq!(cfg.difficulty, 3);
        assert_eq!(cfg.node_id, "miner-1");
        assert_eq!(cfg.peers, vec!["127.0.0.1:5002", "http://127.0.0.1:5003"]);
        assert_eq!(cfg.resolve_interval, Duration::from_secs(30));
    }

    #[test]
    fn unreachable_difficulty_falls_back() {
        assert_eq!(config(&[("DIFFICULTY", "65")]).difficulty, 4);
        assert_eq!(config(&[("DIFFICULTY", "64")]).difficulty, 64);
    }

    #[test]
    fn bad_numbers_fall_back() {
        let cfg = config(&[("PORT", "eighty"), ("DIFFICULTY", "-1")]);
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.difficulty, 4);
    }
}
