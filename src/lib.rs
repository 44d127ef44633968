//! A proof-of-work ledger node: chain, pending pool, mining, validation and
//! longest-valid-chain consensus across peers, served over HTTP.

pub mod api;
pub mod blockchain;
pub mod config;
pub mod network;
pub mod transaction;
