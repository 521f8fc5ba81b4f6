//! Domain types returned by the upstream client and served to callers.

use serde::{Deserialize, Deserializer, Serialize};

// ==============================================================================
// Block
// ==============================================================================

/// A block as returned by `eth_getBlockByNumber`, reduced to the fields the
/// gateway exposes.
///
/// Hex quantities are kept as the node sent them. `transactions` is either an
/// array of hash strings or an array of transaction objects, depending on the
/// mode the block was requested in. `transaction_count` is derived by the
/// client on every fetch; the node never supplies it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Block {
    #[serde(deserialize_with = "null_as_empty")]
    pub number: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub hash: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub parent_hash: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub nonce: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub timestamp: String,
    pub transactions: serde_json::Value,
    pub transaction_count: usize,
}

// Pending blocks carry `null` for hash and nonce.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
