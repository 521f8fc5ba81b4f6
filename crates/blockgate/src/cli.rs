use std::time::Duration;

use clap::Parser;
use eyre::{eyre, WrapErr};

/// Public Polygon endpoint used when no upstream is configured.
pub const DEFAULT_RPC_URL: &str = "https://polygon-rpc.com/";

const RPC_URL_ENV: &str = "BLOCKCHAIN_RPC_URL";
const PORT_ENV: &str = "API_PORT";
const RPC_TIMEOUT_ENV: &str = "RPC_TIMEOUT_SECS";

/// blockgate: REST and JSON-RPC gateway in front of an Ethereum-compatible node.
///
/// Each flag can be overridden by its environment variable; a non-empty
/// variable wins over the flag.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Upstream blockchain RPC URL (env: BLOCKCHAIN_RPC_URL).
    #[arg(long = "rpc", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Listen address: `:8080`, `8080` or `host:port` (env: API_PORT).
    #[arg(long, default_value = ":8080")]
    pub port: String,

    /// Upstream request timeout in seconds, 0 for none (env: RPC_TIMEOUT_SECS).
    #[arg(long, default_value = "30")]
    pub rpc_timeout_secs: u64,
}

impl Cli {
    /// Parse flags from the process arguments, then apply environment overrides.
    pub fn load() -> eyre::Result<Self> {
        let mut cli = Self::parse();
        cli.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(cli)
    }

    pub(crate) fn apply_env_overrides<F>(&mut self, lookup: F) -> eyre::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());

        if let Some(url) = var(RPC_URL_ENV) {
            self.rpc_url = url;
        }
        if let Some(port) = var(PORT_ENV) {
            self.port = port;
        }
        if let Some(secs) = var(RPC_TIMEOUT_ENV) {
            self.rpc_timeout_secs = secs
                .trim()
                .parse()
                .wrap_err_with(|| format!("{RPC_TIMEOUT_ENV} must be a whole number of seconds"))?;
        }
        Ok(())
    }

    pub fn rpc_timeout(&self) -> Option<Duration> {
        (self.rpc_timeout_secs > 0).then(|| Duration::from_secs(self.rpc_timeout_secs))
    }

    /// Resolve `port` into a bindable `host:port` string.
    pub fn listen_addr(&self) -> eyre::Result<String> {
        resolve_listen_addr(&self.port)
    }
}

fn resolve_listen_addr(port: &str) -> eyre::Result<String> {
    let port = port.trim();
    let (host, port_part) = match port.rsplit_once(':') {
        Some(("", p)) => ("0.0.0.0", p),
        Some((h, p)) => (h, p),
        None => ("0.0.0.0", port),
    };
    let port_num: u16 = port_part
        .parse()
        .map_err(|_| eyre!("invalid listen port `{port}`"))?;
    Ok(format!("{host}:{port_num}"))
}
