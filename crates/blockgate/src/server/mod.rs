mod blocks;
mod error;
mod jsonrpc;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use blockgate_core::rpc::EthRpc;

// ==============================================================================
// Application State
// ==============================================================================

pub struct AppState {
    pub rpc: Arc<dyn EthRpc>,
}

type SharedState = Arc<AppState>;

// ==============================================================================
// Router
// ==============================================================================

/// REST routes answer GET only; everything else falls through to the
/// JSON-RPC handler, which owns every path the REST routes do not claim.
pub fn build_router(state: AppState) -> Router {
    let shared = Arc::new(state);

    Router::new()
        .route(
            "/api/blocks/latest",
            get(blocks::get_latest_block)
                .head(error::method_not_allowed)
                .fallback(error::method_not_allowed),
        )
        .route(
            "/api/blocks",
            get(blocks::get_block)
                .head(error::method_not_allowed)
                .fallback(error::method_not_allowed),
        )
        .fallback(jsonrpc::handle_jsonrpc)
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
