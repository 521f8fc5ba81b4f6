//! Upstream Ethereum JSON-RPC abstraction layer.
//!
//! Defines the [`EthRpc`] trait the gateway depends on and provides the HTTP
//! JSON-RPC implementation ([`HttpRpcClient`]).

mod http_adapter;

pub use http_adapter::HttpRpcClient;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::types::Block;

/// The two upstream operations the gateway needs.
///
/// Each call maps to exactly one upstream round trip; implementations do not
/// retry.
#[async_trait]
pub trait EthRpc: Send + Sync {
    /// Latest block number as the hex string the node returned.
    async fn get_block_number(&self) -> Result<String, CoreError>;

    /// Fetch a block, with transaction objects when `full_transactions` is set
    /// and transaction hashes otherwise.
    async fn get_block_by_number(
        &self,
        block_number: &str,
        full_transactions: bool,
    ) -> Result<Block, CoreError>;
}
