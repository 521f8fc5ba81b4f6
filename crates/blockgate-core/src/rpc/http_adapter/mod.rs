//! Native JSON-RPC client for Ethereum-compatible endpoints.
//!
//! Implements [`super::EthRpc`] over HTTP using `reqwest`: one POST per call,
//! fixed request id, no retries.

mod client;
mod connection;
mod parsing;
mod protocol;

pub use client::HttpRpcClient;
