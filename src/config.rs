use std::env;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::blockchain::Validation;
use crate::network::{PeerAddress, PeerError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key}: invalid value `{value}`")]
    Invalid { key: &'static str, value: String },

    #[error("PEERS: {0}")]
    Peer(#[from] PeerError),
}

/// Node settings, read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Recipient of this node's mining rewards.
    pub node_id: String,
    /// Peers registered at startup.
    pub peers: Vec<PeerAddress>,
    /// Upper bound on a single `/chain` fetch from a peer.
    pub peer_timeout: Duration,
    /// `None` lets a proof search run until it succeeds.
    pub mining_deadline: Option<Duration>,
    pub validation: Validation,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            node_id: Uuid::new_v4().simple().to_string(),
            peers: Vec::new(),
            peer_timeout: Duration::from_millis(3000),
            mining_deadline: None,
            validation: Validation::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key/value source. Unset or blank keys keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(host) = get("HOST") {
            config.host = host.trim().to_string();
        }
        if let Some(port) = get("PORT") {
            config.port = parse("PORT", &port)?;
        }
        if let Some(node_id) = get("NODE_ID") {
            config.node_id = node_id.trim().to_string();
        }
        if let Some(peers) = get("PEERS") {
            config.peers = peers
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(PeerAddress::parse)
                .collect::<Result<Vec<_>, _>>()?;
        }
        if let Some(ms) = get("PEER_TIMEOUT_MS") {
            config.peer_timeout = Duration::from_millis(parse("PEER_TIMEOUT_MS", &ms)?);
        }
        if let Some(secs) = get("MINING_DEADLINE_SECS") {
            config.mining_deadline =
                Some(Duration::from_secs(parse("MINING_DEADLINE_SECS", &secs)?));
        }
        if let Some(mode) = get("CHAIN_VALIDATION") {
            config.validation = parse("CHAIN_VALIDATION", &mode)?;
        }

        Ok(config)
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}
