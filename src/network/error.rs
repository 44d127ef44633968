use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeerError {
    #[error("invalid peer address `{0}`")]
    InvalidAddress(String),
}

/// Why a peer's chain could not be read. The peer is skipped for the round.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("peer answered with status {0}")]
    Status(u16),

    #[error("malformed chain payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("peer reported length {reported} but sent {actual} blocks")]
    LengthMismatch { reported: usize, actual: usize },
}
