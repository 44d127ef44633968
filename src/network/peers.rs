use actix_web::http::Uri;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::RwLock;

use super::PeerError;

/// Normalised `host[:port]` of a peer node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeerAddress(String);

impl PeerAddress {
    /// Accepts a full URL (`http://10.0.0.2:5000/`) or a bare `host:port`.
    /// Scheme, credentials and path are dropped and the host is lower-cased.
    pub fn parse(raw: &str) -> Result<Self, PeerError> {
        let invalid = || PeerError::InvalidAddress(raw.to_string());

        let uri: Uri = raw.trim().parse().map_err(|_| invalid())?;
        let authority = uri.authority().ok_or_else(invalid)?;
        let host = authority.host().to_ascii_lowercase();
        if host.is_empty() {
            return Err(invalid());
        }

        Ok(match authority.port_u16() {
            Some(port) => Self(format!("{host}:{port}")),
            None => Self(host),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Where the peer serves its chain.
    pub fn chain_url(&self) -> String {
        format!("http://{}/chain", self.0)
    }
}

impl FromStr for PeerAddress {
    type Err = PeerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PeerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Known peers. Grows only through registration; nothing is ever removed.
#[derive(Debug, Default)]
pub struct PeerRegistry {
    peers: RwLock<BTreeSet<PeerAddress>>,
}

impl PeerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and add one peer. Returns the normalised address.
    pub fn register(&self, raw: &str) -> Result<PeerAddress, PeerError> {
        let address = PeerAddress::parse(raw)?;
        self.insert(address.clone());
        Ok(address)
    }

    /// Parse every entry first; nothing is added unless all of them are valid.
    pub fn register_all<S: AsRef<str>>(&self, raws: &[S]) -> Result<Vec<PeerAddress>, PeerError> {
        let addresses = raws
            .iter()
            .map(|raw| PeerAddress::parse(raw.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut peers = self.peers.write().expect("peer set lock poisoned");
        peers.extend(addresses.iter().cloned());
        Ok(addresses)
    }

    pub fn insert(&self, address: PeerAddress) -> bool {
        self.peers
            .write()
            .expect("peer set lock poisoned")
            .insert(address)
    }

    /// Copy of the current set, in iteration order.
    pub fn peers(&self) -> Vec<PeerAddress> {
        self.peers
            .read()
            .expect("peer set lock poisoned")
            .iter()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.peers.read().expect("peer set lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalises_urls_and_bare_authorities() {
        let cases = [
            ("http://192.168.0.5:5000", "192.168.0.5:5000"),
            ("http://192.168.0.5:5000/chain?x=1", "192.168.0.5:5000"),
            ("192.168.0.5:5000", "192.168.0.5:5000"),
            ("  Node-A.Example:5001 ", "node-a.example:5001"),
            ("https://PEER.example", "peer.example"),
        ];
        for (raw, expected) in cases {
            assert_eq!(PeerAddress::parse(raw).unwrap().as_str(), expected, "{raw}");
        }
    }

    #[test]
    fn rejects_addresses_without_authority() {
        for raw in ["", "   ", "/chain", "not a host"] {
            assert_eq!(
                PeerAddress::parse(raw),
                Err(PeerError::InvalidAddress(raw.to_string())),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn register_is_idempotent() {
        let registry = PeerRegistry::new();
        registry.register("http://127.0.0.1:5001").unwrap();
        registry.register("127.0.0.1:5001").unwrap();
        registry.register("http://127.0.0.1:5001/").unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.peers()[0].chain_url(), "http://127.0.0.1:5001/chain");
    }

    #[test]
    fn register_all_is_all_or_nothing() {
        let registry = PeerRegistry::new();
        let err = registry
            .register_all(&["127.0.0.1:5001", "bad host"])
            .unwrap_err();
        assert_eq!(err, PeerError::InvalidAddress("bad host".into()));
        assert!(registry.is_empty());

        let added = registry
            .register_all(&["127.0.0.1:5002", "127.0.0.1:5001"])
            .unwrap();
        assert_eq!(added.len(), 2);
        assert_eq!(
            registry.peers(),
            vec![
                PeerAddress::parse("127.0.0.1:5001").unwrap(),
                PeerAddress::parse("127.0.0.1:5002").unwrap(),
            ]
        );
    }

    #[test]
    fn serializes_as_plain_string() {
        let peer = PeerAddress::parse("http://peer:1").unwrap();
        assert_eq!(serde_json::to_string(&peer).unwrap(), r#""peer:1""#);
    }
}
