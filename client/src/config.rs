//! Command line and environment configuration.

use std::{
    path::PathBuf,
    time::Duration,
};

use clap::Parser;
use helloworld_interface::PROGRAM_KEYPAIR_FILE;
use url::Url;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Greets the hello-world program's account for the given payer and prints the greeting count.
///
/// Every option can be supplied through its environment variable instead of the flag.
#[derive(Clone, Debug, Parser)]
#[command(name = "hello-client", version)]
pub struct Config {
    /// The RPC endpoint of the ledger node, e.g. `http://127.0.0.1:8899`.
    #[arg(long, env = "RPC_URL", value_parser = parse_rpc_url)]
    pub rpc_url: Url,

    /// Path to the payer's keypair file (a JSON array of secret key bytes).
    #[arg(long, env = "KEYPAIR_PATH")]
    pub keypair_path: PathBuf,

    /// Directory containing the deployed program's `helloworld-keypair.json`.
    #[arg(long, env = "PROGRAM_PATH")]
    pub program_path: PathBuf,

    /// Timeout in seconds applied to each RPC request.
    #[arg(long, env = "RPC_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

impl Config {
    pub fn program_keypair_path(&self) -> PathBuf {
        self.program_path.join(PROGRAM_KEYPAIR_FILE)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Accepts absolute `http`/`https` URLs with a host.
fn parse_rpc_url(input: &str) -> Result<Url, String> {
    let url = Url::parse(input.trim()).map_err(|e| format!("`{input}` isn't a valid URL: {e}"))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("`{input}` must use http or https, not {}", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err(format!("`{input}` has no host"));
    }

    Ok(url)
}
