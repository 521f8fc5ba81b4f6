#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Failures of a single upstream JSON-RPC round trip.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("failed to send request: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status code: {0}")]
    UnexpectedStatus(u16),

    /// The upstream body, or a field inside it, is not the expected JSON.
    #[error("failed to unmarshal response: {0}")]
    Decode(String),

    /// The upstream node answered with a JSON-RPC error object.
    #[error("RPC error: {message} (code: {code})")]
    Upstream { code: i64, message: String },
}
