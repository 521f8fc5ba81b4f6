use tracing::{debug, warn};

use crate::error::{CoreError, RpcError};
use crate::types::Block;

pub(super) fn parse_block_number_result(raw: serde_json::Value) -> Result<String, CoreError> {
    serde_json::from_value(raw).map_err(|e| {
        RpcError::Decode(format!("failed to unmarshal block number: {e}")).into()
    })
}

/// Decode an `eth_getBlockByNumber` result and derive its transaction count.
///
/// A `null` result (the node's answer for an unknown block) decodes as an
/// empty block with no transactions.
pub(super) fn parse_block_result(
    raw: serde_json::Value,
    block_number: &str,
    full_transactions: bool,
) -> Result<Block, CoreError> {
    if raw.is_null() {
        debug!(block = %block_number, "upstream returned null block");
        return Ok(Block::default());
    }

    let mut block: Block = serde_json::from_value(raw)
        .map_err(|e| RpcError::Decode(format!("failed to unmarshal block: {e}")))?;

    block.transaction_count = match count_transactions(&block.transactions, full_transactions) {
        Some(count) => count,
        None => {
            warn!(
                block = %block_number,
                full_transactions,
                "transactions payload does not match the requested mode; reporting 0 transactions"
            );
            0
        }
    };

    Ok(block)
}

// Full mode accepts any element type; hash mode requires every element to be a
// string or `null`. `None` means the payload did not decode for the mode.
fn count_transactions(transactions: &serde_json::Value, full_transactions: bool) -> Option<usize> {
    let entries = transactions.as_array()?;
    if full_transactions
        || entries
            .iter()
            .all(|entry| entry.is_string() || entry.is_null())
    {
        Some(entries.len())
    } else {
        None
    }
}
