//! Shared block fixtures for `blockgate-core` unit tests.

use crate::types::Block;

/// `count` distinct transaction hash strings, as returned when a block is
/// requested without full transactions.
pub fn tx_hashes(count: usize) -> serde_json::Value {
    (0..count)
        .map(|i| serde_json::Value::String(format!("0x{i:064x}")))
        .collect()
}

/// `count` minimal transaction objects, as returned in full-transaction mode.
pub fn tx_objects(count: usize) -> serde_json::Value {
    (0..count)
        .map(|i| {
            serde_json::json!({
                "hash": format!("0x{i:064x}"),
                "from": "0x0000000000000000000000000000000000000001",
                "to": "0x0000000000000000000000000000000000000002",
            })
        })
        .collect()
}

/// Build a block whose `transaction_count` matches the length of
/// `transactions` (0 when it is not an array).
pub fn make_block(number: &str, transactions: serde_json::Value) -> Block {
    let transaction_count = transactions.as_array().map_or(0, Vec::len);
    Block {
        number: number.to_owned(),
        hash: "0xabcdef1234567890".to_owned(),
        parent_hash: "0x1234567890abcdef".to_owned(),
        nonce: "0x0000000000000000".to_owned(),
        timestamp: "0x60123456".to_owned(),
        transactions,
        transaction_count,
    }
}

/// The `result` payload a node would send for `make_block(number, transactions)`.
pub fn raw_block(number: &str, transactions: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "number": number,
        "hash": "0xabcdef1234567890",
        "parentHash": "0x1234567890abcdef",
        "nonce": "0x0000000000000000",
        "timestamp": "0x60123456",
        "miner": "0x0000000000000000000000000000000000000000",
        "transactions": transactions,
    })
}
