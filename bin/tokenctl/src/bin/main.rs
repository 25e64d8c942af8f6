//! Interactive token console.
//!
//! Connects to the configured token, keeps its state in sync and accepts
//! mint / burn / transfer commands on stdin.

use alloy_primitives::Address;
use clap::Parser;
use client::LocalWallet;
use config::NetworkType;
use std::path::PathBuf;
use tokenctl::{config::Config, metrics::install_prometheus_exporter, run_session};
use tracing::info;

#[derive(Parser)]
#[command(name = "tokenctl")]
#[command(about = "Mint, burn and transfer tokens from the terminal")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Private keys for signing, comma separated (hex, with or without 0x prefix)
    #[arg(short = 'k', long = "private-key", env = "PRIVATE_KEY", value_delimiter = ',')]
    private_keys: Vec<String>,

    /// Network preset (local or sepolia)
    #[arg(short, long)]
    network: Option<NetworkType>,

    /// RPC endpoint url
    #[arg(long)]
    rpc_url: Option<String>,

    /// Token contract address
    #[arg(long)]
    token: Option<Address>,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading config: {}", path.display());
            Config::from_file(path)?
        }
        None => Config::default(),
    };

    // CLI flags win over the file
    if let Some(network) = cli.network {
        config.network = network;
    }
    if let Some(rpc_url) = cli.rpc_url {
        config.rpc_url = Some(rpc_url);
    }
    if let Some(token) = cli.token {
        config.token_address = Some(token);
    }

    let network = config.network_config();

    info!("Loaded config:");
    info!("  Network: {}", network.network_type);
    info!("  RPC URL: {}", network.default_rpc_url);
    info!("  Token: {}", network.token);
    info!("  Decimals: {}", network.decimals);
    info!("  Pending timeout: {}s", config.pending_timeout_secs);

    if let Some(port) = config.metrics_port {
        install_prometheus_exporter(port)?;
        info!("  Metrics: http://0.0.0.0:{}/metrics", port);
    }

    let wallet = LocalWallet::from_private_keys(&cli.private_keys)?;
    match &wallet {
        Some(wallet) => info!("  Accounts: {}", wallet.accounts().len()),
        None => info!("  Accounts: none (read-only)"),
    }

    run_session(&network, config.session_config(), wallet).await
}
