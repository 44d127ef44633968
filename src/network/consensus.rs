use futures::future::join_all;
use log::{debug, info, warn};

use super::{ChainFetcher, PeerAddress};
use crate::blockchain::{Block, Validation};

/// Outcome of one consensus round.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Whether a peer chain won over the local one.
    pub adopted: bool,
    /// The winning chain (the local one when nothing was adopted).
    pub chain: Vec<Block>,
}

/// Longest-valid-chain rule.
///
/// Peers are queried concurrently, then their answers are weighed in the
/// order of `peers`. A chain replaces the current best only when its
/// reported length is strictly greater and it passes `validation`, so among
/// peers tied at the maximal length the first one listed wins. Peers that
/// cannot be read are skipped for this round.
pub async fn resolve<F>(
    local: Vec<Block>,
    peers: &[PeerAddress],
    fetcher: &F,
    validation: Validation,
) -> Resolution
where
    F: ChainFetcher + ?Sized,
{
    let answers = join_all(peers.iter().map(|peer| async move {
        let answer = fetcher.fetch_chain(peer).await;
        (peer, answer)
    }))
    .await;

    let mut best_len = local.len();
    let mut best: Option<Vec<Block>> = None;

    for (peer, answer) in answers {
        let snapshot = match answer {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!("consensus: skipping peer {peer}: {err}");
                continue;
            }
        };

        if snapshot.length <= best_len {
            debug!(
                "consensus: peer {peer} has {} blocks, best so far is {best_len}",
                snapshot.length
            );
            continue;
        }

        match validation.check(&snapshot.chain) {
            Ok(()) => {
                debug!(
                    "consensus: peer {peer} offers a valid chain of {} blocks",
                    snapshot.length
                );
                best_len = snapshot.length;
                best = Some(snapshot.chain);
            }
            Err(err) => warn!(
                "consensus: rejecting {}-block chain from {peer}: {err}",
                snapshot.length
            ),
        }
    }

    match best {
        Some(chain) => {
            info!(
                "consensus: adopting peer chain ({} -> {} blocks)",
                local.len(),
                chain.len()
            );
            Resolution {
                adopted: true,
                chain,
            }
        }
        None => Resolution {
            adopted: false,
            chain: local,
        },
    }
}
