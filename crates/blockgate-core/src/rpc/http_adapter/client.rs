use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, StatusCode, Url};
use tracing::{debug, trace};

use crate::error::{CoreError, RpcError};
use crate::types::Block;

use super::super::EthRpc;
use super::connection::parse_connection;
use super::parsing::{parse_block_number_result, parse_block_result};
use super::protocol::{parse_jsonrpc_error, JsonRpcRequest, JsonRpcResponse};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Ethereum JSON-RPC client over HTTP(S).
///
/// Every operation is a single POST to the configured endpoint. The client
/// holds no per-call state, so one instance is shared by all request handlers.
pub struct HttpRpcClient {
    client: reqwest::Client,
    url: Url,
}

impl HttpRpcClient {
    /// Create a client for an `http://` or `https://` endpoint.
    ///
    /// `timeout` bounds each whole round trip; `None` leaves the call without
    /// a deadline.
    pub fn new(connection: &str, timeout: Option<Duration>) -> Result<Self, CoreError> {
        let url = parse_connection(connection)?;

        let mut builder = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .tcp_nodelay(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| CoreError::Config(format!("build http client: {e}")))?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    async fn rpc_call(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, CoreError> {
        debug!(rpc.method = method, rpc.params = params.len(), "rpc call");
        let req = JsonRpcRequest::new(method, params);

        let response = self
            .client
            .post(self.url.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .json(&req)
            .send()
            .await
            .map_err(RpcError::Transport)?;
        let status = response.status();
        if status != StatusCode::OK {
            debug!(rpc.method = method, %status, "rpc call rejected");
            return Err(RpcError::UnexpectedStatus(status.as_u16()).into());
        }

        let body = response.text().await.map_err(RpcError::Transport)?;
        debug!(rpc.method = method, %status, body_len = body.len(), "rpc response");
        trace!(rpc.method = method, body = %body, "rpc response body");

        let decoded: JsonRpcResponse = serde_json::from_str(&body).map_err(|e| {
            RpcError::Decode(format!("decode JSON-RPC response: {e}; body={body}"))
        })?;

        if let Some(err) = decoded.error {
            return Err(parse_jsonrpc_error(err));
        }

        decoded
            .result
            .ok_or_else(|| RpcError::Decode("JSON-RPC response has no result".to_string()).into())
    }
}

#[async_trait]
impl EthRpc for HttpRpcClient {
    async fn get_block_number(&self) -> Result<String, CoreError> {
        let raw = self.rpc_call("eth_blockNumber", Vec::new()).await?;
        parse_block_number_result(raw)
    }

    async fn get_block_by_number(
        &self,
        block_number: &str,
        full_transactions: bool,
    ) -> Result<Block, CoreError> {
        let raw = self
            .rpc_call(
                "eth_getBlockByNumber",
                vec![
                    serde_json::json!(block_number),
                    serde_json::json!(full_transactions),
                ],
            )
            .await?;
        parse_block_result(raw, block_number, full_transactions)
    }
}
