use serde::{Deserialize, Deserializer};

use crate::error::{CoreError, RpcError};

/// Correlation id sent on every upstream request. Existing deployments expect
/// it to stay constant.
const UPSTREAM_REQUEST_ID: u64 = 2;

#[derive(serde::Serialize)]
pub(super) struct JsonRpcRequest<'a> {
    pub(super) jsonrpc: &'static str,
    pub(super) method: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(super) params: Vec<serde_json::Value>,
    pub(super) id: u64,
}

impl<'a> JsonRpcRequest<'a> {
    pub(super) fn new(method: &'a str, params: Vec<serde_json::Value>) -> Self {
        Self {
            jsonrpc: "2.0",
            method,
            params,
            id: UPSTREAM_REQUEST_ID,
        }
    }
}

/// `result` is `None` only when the member is absent; an explicit `null`
/// decodes as `Some(Value::Null)`.
#[derive(Deserialize)]
pub(super) struct JsonRpcResponse {
    #[serde(default, deserialize_with = "present")]
    pub(super) result: Option<serde_json::Value>,
    pub(super) error: Option<serde_json::Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

/// Parse a JSON-RPC error value into a structured `CoreError`.
///
/// Errors shaped `{"code": <int>, "message": <string>}` become
/// `RpcError::Upstream`; anything else is reported as undecodable with the raw
/// JSON attached.
pub(super) fn parse_jsonrpc_error(err: serde_json::Value) -> CoreError {
    #[derive(serde::Deserialize)]
    struct JsonRpcError {
        code: i64,
        message: String,
    }

    match serde_json::from_value::<JsonRpcError>(err.clone()) {
        Ok(parsed) => RpcError::Upstream {
            code: parsed.code,
            message: parsed.message,
        }
        .into(),
        Err(_) => RpcError::Decode(format!("non-standard JSON-RPC error: {err}")).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_without_params_omits_the_field() {
        let req = JsonRpcRequest::new("eth_blockNumber", Vec::new());
        let json = serde_json::to_value(&req).expect("request must serialize");
        assert_eq!(
            json,
            serde_json::json!({ "jsonrpc": "2.0", "method": "eth_blockNumber", "id": 2 })
        );
    }

    #[test]
    fn request_with_params_keeps_positional_order() {
        let req = JsonRpcRequest::new(
            "eth_getBlockByNumber",
            vec![serde_json::json!("0x10"), serde_json::json!(true)],
        );
        let json = serde_json::to_value(&req).expect("request must serialize");
        assert_eq!(json["params"], serde_json::json!(["0x10", true]));
        assert_eq!(json["id"], 2);
    }

    #[test]
    fn response_distinguishes_null_from_missing_result() {
        let null: JsonRpcResponse =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":2,"result":null}"#).expect("decode");
        assert_eq!(null.result, Some(serde_json::Value::Null));

        let missing: JsonRpcResponse =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":2}"#).expect("decode");
        assert_eq!(missing.result, None);
        assert!(missing.error.is_none());
    }

    #[test]
    fn standard_error_maps_to_upstream() {
        let err = parse_jsonrpc_error(serde_json::json!({
            "code": -32000,
            "message": "header not found",
        }));
        assert!(matches!(
            err,
            CoreError::Rpc(RpcError::Upstream { code: -32000, ref message }) if message == "header not found"
        ));
        assert_eq!(err.to_string(), "RPC error: header not found (code: -32000)");
    }

    #[test]
    fn non_standard_error_maps_to_decode() {
        let err = parse_jsonrpc_error(serde_json::json!("boom"));
        assert!(matches!(err, CoreError::Rpc(RpcError::Decode(_))));
        assert!(err.to_string().contains("non-standard JSON-RPC error"));
    }
}
