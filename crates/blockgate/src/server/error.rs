use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::warn;

use blockgate_core::CoreError;

// ==============================================================================
// Error Type
// ==============================================================================

/// Failures of the REST-style endpoints, rendered as `{"error": message}`.
#[derive(Debug)]
pub(crate) enum AppError {
    BadRequest(String),
    MethodNotAllowed,
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "method not allowed".to_string(),
            ),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// Every upstream failure is a 500 carrying the client's error message.
pub(super) fn map_upstream_error(method: &str, err: CoreError) -> AppError {
    warn!(rpc.method = method, error = %err, "upstream call failed");
    AppError::Internal(err.to_string())
}

pub(super) async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
