//! JSON-RPC 2.0 entry point.
//!
//! Mounted as the router fallback, so every path the REST routes do not claim
//! lands here. Only `eth_blockNumber` and `eth_getBlockByNumber` are served;
//! batches are not supported.

use axum::body::to_bytes;
use axum::extract::{Request, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use blockgate_core::rpc::EthRpc;

use super::error::AppError;
use super::SharedState;

pub(super) const INVALID_REQUEST: i64 = -32600;
pub(super) const METHOD_NOT_FOUND: i64 = -32601;
pub(super) const INVALID_PARAMS: i64 = -32602;
pub(super) const INTERNAL_ERROR: i64 = -32603;

const JSONRPC_VERSION: &str = "2.0";
pub(super) const MAX_BODY_BYTES: usize = 1024 * 1024;

// ==============================================================================
// Envelopes
// ==============================================================================

/// Inbound envelope. Missing or `null` members take their zero value; the
/// version is checked after decoding so the id can still be echoed.
#[derive(Debug, Default, Deserialize)]
pub(super) struct RpcRequest {
    #[serde(default)]
    jsonrpc: Option<String>,
    #[serde(default)]
    method: Option<String>,
    #[serde(default)]
    params: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(super) struct RpcErrorObject {
    code: i64,
    message: String,
}

impl RpcErrorObject {
    fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Outbound envelope; the constructors guarantee exactly one of `result` and
/// `error` is present.
#[derive(Debug, Serialize)]
pub(super) struct RpcResponse {
    jsonrpc: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<RpcErrorObject>,
    id: i64,
}

impl RpcResponse {
    fn success(id: i64, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            result: Some(result),
            error: None,
            id,
        }
    }

    fn failure(id: i64, error: RpcErrorObject) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            result: None,
            error: Some(error),
            id,
        }
    }
}

// Only a JSON object is an envelope; arrays (batches) and scalars are rejected.
// A `null` body decodes as an envelope with every member missing.
fn parse_request(body: &[u8]) -> Option<RpcRequest> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    if value.is_null() {
        return Some(RpcRequest::default());
    }
    if !value.is_object() {
        return None;
    }
    serde_json::from_value(value).ok()
}

// ==============================================================================
// Handler
// ==============================================================================

pub(super) async fn handle_jsonrpc(State(state): State<SharedState>, request: Request) -> Response {
    if request.method() != Method::POST {
        return AppError::MethodNotAllowed.into_response();
    }

    let body = match to_bytes(request.into_body(), MAX_BODY_BYTES).await {
        Ok(body) => body,
        Err(e) => {
            debug!(error = %e, "failed to read JSON-RPC body");
            return AppError::BadRequest("failed to read request body".to_string())
                .into_response();
        }
    };

    let Some(request) = parse_request(&body) else {
        return AppError::BadRequest("invalid JSON-RPC request".to_string()).into_response();
    };

    let id = request.id.unwrap_or(0);
    if request.jsonrpc.as_deref() != Some(JSONRPC_VERSION) {
        let error = RpcErrorObject::new(
            INVALID_REQUEST,
            "invalid JSON-RPC version, expected 2.0",
        );
        return (StatusCode::BAD_REQUEST, Json(RpcResponse::failure(id, error))).into_response();
    }

    let method = request.method.unwrap_or_default();
    let params = request.params.unwrap_or_default();
    debug!(rpc.method = %method, rpc.id = id, rpc.params = params.len(), "json-rpc request");

    let response = match dispatch(state.rpc.as_ref(), &method, &params).await {
        Ok(result) => RpcResponse::success(id, result),
        Err(error) => {
            debug!(rpc.method = %method, rpc.id = id, code = error.code, message = %error.message, "json-rpc error");
            RpcResponse::failure(id, error)
        }
    };

    (StatusCode::OK, Json(response)).into_response()
}

// ==============================================================================
// Dispatch
// ==============================================================================

async fn dispatch(
    rpc: &dyn EthRpc,
    method: &str,
    params: &[serde_json::Value],
) -> Result<serde_json::Value, RpcErrorObject> {
    match method {
        "eth_blockNumber" => rpc
            .get_block_number()
            .await
            .map(serde_json::Value::String)
            .map_err(|e| RpcErrorObject::new(INTERNAL_ERROR, e.to_string())),

        "eth_getBlockByNumber" => {
            let (block_number, full_transactions) = parse_get_block_params(params)?;
            let block = rpc
                .get_block_by_number(block_number, full_transactions)
                .await
                .map_err(|e| RpcErrorObject::new(INTERNAL_ERROR, e.to_string()))?;
            serde_json::to_value(block)
                .map_err(|_| RpcErrorObject::new(INTERNAL_ERROR, "failed to marshal result"))
        }

        _ => Err(RpcErrorObject::new(METHOD_NOT_FOUND, "method not found")),
    }
}

fn parse_get_block_params(params: &[serde_json::Value]) -> Result<(&str, bool), RpcErrorObject> {
    let [block_number, full_transactions, ..] = params else {
        return Err(RpcErrorObject::new(
            INVALID_PARAMS,
            "invalid params for eth_getBlockByNumber",
        ));
    };
    let block_number = block_number
        .as_str()
        .ok_or_else(|| RpcErrorObject::new(INVALID_PARAMS, "invalid block number parameter"))?;
    let full_transactions = full_transactions.as_bool().ok_or_else(|| {
        RpcErrorObject::new(INVALID_PARAMS, "invalid full transactions parameter")
    })?;
    Ok((block_number, full_transactions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_block_params_are_validated_in_order() {
        let err = parse_get_block_params(&[json!("0x1")]).expect_err("one param must fail");
        assert_eq!(
            err,
            RpcErrorObject::new(INVALID_PARAMS, "invalid params for eth_getBlockByNumber")
        );

        let err = parse_get_block_params(&[json!(1), json!("true")]).expect_err("must fail");
        assert_eq!(err.message, "invalid block number parameter");

        let err = parse_get_block_params(&[json!("0x1"), json!("true")]).expect_err("must fail");
        assert_eq!(err.message, "invalid full transactions parameter");

        let params = [json!("latest"), json!(false), json!("extra")];
        let ok = parse_get_block_params(&params).expect("extra params are ignored");
        assert_eq!(ok, ("latest", false));
    }

    #[test]
    fn parse_request_fills_missing_members() {
        let request = parse_request(br#"{"jsonrpc":"2.0","method":"eth_blockNumber"}"#)
            .expect("must parse");
        assert_eq!(request.id, None);
        assert_eq!(request.params, None);

        let request = parse_request(br#"{"jsonrpc":"2.0","method":"m","params":null,"id":null}"#)
            .expect("nulls must parse");
        assert_eq!(request.id, None);
        assert_eq!(request.method.as_deref(), Some("m"));
    }

    #[test]
    fn parse_request_treats_null_body_as_empty_envelope() {
        let request = parse_request(b"null").expect("null must parse");
        assert_eq!(request.jsonrpc, None);
        assert_eq!(request.method, None);
        assert_eq!(request.id, None);
    }

    #[test]
    fn parse_request_rejects_non_envelopes() {
        for body in [
            &b"not json"[..],
            br#"[{"jsonrpc":"2.0","method":"eth_blockNumber","id":1}]"#,
            br#""2.0""#,
            br#"{"jsonrpc":"2.0","method":"eth_blockNumber","id":"abc"}"#,
            br#"{"jsonrpc":"2.0","method":"eth_blockNumber","id":1.5}"#,
            br#"{"jsonrpc":"2.0","method":"eth_blockNumber","params":{"a":1},"id":1}"#,
        ] {
            assert!(
                parse_request(body).is_none(),
                "must reject {}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn response_carries_exactly_one_of_result_and_error() {
        let ok = serde_json::to_value(RpcResponse::success(7, json!("0x1"))).expect("serialize");
        assert_eq!(ok, json!({ "jsonrpc": "2.0", "result": "0x1", "id": 7 }));

        let err = serde_json::to_value(RpcResponse::failure(
            7,
            RpcErrorObject::new(METHOD_NOT_FOUND, "method not found"),
        ))
        .expect("serialize");
        assert_eq!(
            err,
            json!({
                "jsonrpc": "2.0",
                "error": { "code": -32601, "message": "method not found" },
                "id": 7,
            })
        );
    }
}
