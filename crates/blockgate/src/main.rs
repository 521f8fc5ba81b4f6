mod cli;
mod server;

use std::sync::Arc;

use eyre::WrapErr;

use blockgate_core::rpc::{EthRpc, HttpRpcClient};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = cli::Cli::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    let bind_addr = args.listen_addr()?;
    let client = HttpRpcClient::new(&args.rpc_url, args.rpc_timeout())
        .context("configure upstream RPC client")?;

    tracing::info!(
        upstream = %client.url(),
        timeout_secs = args.rpc_timeout_secs,
        "blockchain client connecting to upstream"
    );

    let rpc: Arc<dyn EthRpc> = Arc::new(client);
    check_upstream(rpc.as_ref()).await;

    let router = server::build_router(server::AppState { rpc });

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .wrap_err_with(|| format!("bind TCP listener on {bind_addr}"))?;

    tracing::info!("listening on {bind_addr}");
    axum::serve(listener, router)
        .await
        .context("run HTTP server")?;

    Ok(())
}

/// Best-effort reachability check. The gateway serves requests either way;
/// a failing upstream only shows up as per-request errors.
async fn check_upstream(rpc: &dyn EthRpc) {
    match rpc.get_block_number().await {
        Ok(latest) => tracing::info!(latest_block = %latest, "upstream reachable"),
        Err(e) => tracing::warn!(
            error = %e,
            "upstream check failed; requests will fail until the endpoint responds"
        ),
    }
}
