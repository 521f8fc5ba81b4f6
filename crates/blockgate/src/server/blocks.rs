use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;

use blockgate_core::Block;

use super::error::{map_upstream_error, AppError};
use super::SharedState;

// ==============================================================================
// DTOs
// ==============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct BlockNumberResponse {
    block_number: String,
}

#[derive(Serialize)]
pub(super) struct BlockResponse {
    block: Block,
}

/// Query parameters of `GET /api/blocks`, taken from the first occurrence of
/// each key.
#[derive(Debug, PartialEq)]
pub(super) struct BlockQuery {
    number: Option<String>,
    full: bool,
}

impl BlockQuery {
    fn from_pairs(pairs: &[(String, String)]) -> Self {
        let first = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };

        Self {
            number: first("number")
                .filter(|n| !n.is_empty())
                .map(str::to_owned),
            full: first("full") == Some("true"),
        }
    }
}

// ==============================================================================
// Handlers
// ==============================================================================

pub(super) async fn get_latest_block(
    State(state): State<SharedState>,
) -> Result<Json<BlockNumberResponse>, AppError> {
    let block_number = state
        .rpc
        .get_block_number()
        .await
        .map_err(|e| map_upstream_error("eth_blockNumber", e))?;

    Ok(Json(BlockNumberResponse { block_number }))
}

pub(super) async fn get_block(
    State(state): State<SharedState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<BlockResponse>, AppError> {
    let query = BlockQuery::from_pairs(&pairs);
    let number = query
        .number
        .ok_or_else(|| AppError::BadRequest("block number is required".to_string()))?;

    let block = state
        .rpc
        .get_block_by_number(&number, query.full)
        .await
        .map_err(|e| map_upstream_error("eth_getBlockByNumber", e))?;

    Ok(Json(BlockResponse { block }))
}
