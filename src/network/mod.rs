pub mod consensus;
pub mod error;
pub mod fetch;
pub mod peers;

pub use consensus::{Resolution, resolve};
pub use error::{FetchError, PeerError};
pub use fetch::{ChainFetcher, HttpChainFetcher};
pub use peers::{PeerAddress, PeerRegistry};
