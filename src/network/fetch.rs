use async_trait::async_trait;
use log::debug;
use std::time::Duration;

use super::{FetchError, PeerAddress};
use crate::blockchain::ChainSnapshot;

/// Reads a peer's chain. Implemented over HTTP in production.
#[async_trait]
pub trait ChainFetcher: Send + Sync {
    async fn fetch_chain(&self, peer: &PeerAddress) -> Result<ChainSnapshot, FetchError>;
}

/// Fetches `GET http://{peer}/chain` with a per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpChainFetcher {
    client: reqwest::Client,
}

impl HttpChainFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ChainFetcher for HttpChainFetcher {
    async fn fetch_chain(&self, peer: &PeerAddress) -> Result<ChainSnapshot, FetchError> {
        let url = peer.chain_url();
        debug!("fetching chain from {url}");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let body = response.bytes().await?;
        decode_snapshot(&body)
    }
}

/// Decode a `/chain` payload, refusing one whose length field disagrees
/// with the blocks it carries.
pub fn decode_snapshot(body: &[u8]) -> Result<ChainSnapshot, FetchError> {
    let snapshot: ChainSnapshot = serde_json::from_slice(body)?;
    if snapshot.length != snapshot.chain.len() {
        return Err(FetchError::LengthMismatch {
            reported: snapshot.length,
            actual: snapshot.chain.len(),
        });
    }
    Ok(snapshot)
}

/// Canned peer responses for tests; unknown peers answer 503.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct StaticFetcher {
    chains: std::collections::HashMap<PeerAddress, ChainSnapshot>,
}

#[cfg(test)]
impl StaticFetcher {
    pub(crate) fn with(mut self, peer: &str, chain: Vec<crate::blockchain::Block>) -> Self {
        let snapshot = ChainSnapshot {
            length: chain.len(),
            chain,
        };
        self.chains
            .insert(PeerAddress::parse(peer).expect("test peer address"), snapshot);
        self
    }
}

#[cfg(test)]
#[async_trait]
impl ChainFetcher for StaticFetcher {
    async fn fetch_chain(&self, peer: &PeerAddress) -> Result<ChainSnapshot, FetchError> {
        self.chains.get(peer).cloned().ok_or(FetchError::Status(503))
    }
}
