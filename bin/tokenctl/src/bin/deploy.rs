//! Deploy the token contract and print its address.
//!
//! Exits with status 0 on success and 1 on any error.

use clap::Parser;
use client::LocalWallet;
use std::path::PathBuf;
use tokenctl::{
    config::Config,
    deploy::{deploy_token, Artifact, DEFAULT_NAME, DEFAULT_SYMBOL},
};
use tracing::info;

#[derive(Parser)]
#[command(name = "deploy")]
#[command(about = "Deploy the token contract")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Private keys, comma separated; the first one deploys
    #[arg(
        short = 'k',
        long = "private-key",
        env = "PRIVATE_KEY",
        value_delimiter = ',',
        required = true
    )]
    private_keys: Vec<String>,

    /// RPC endpoint url
    #[arg(long)]
    rpc_url: Option<String>,

    /// Compiled contract artifact (JSON with a `bytecode` field)
    #[arg(
        short,
        long,
        default_value = "artifacts/contracts/ERC20Token.sol/ERC20Token.json"
    )]
    artifact: PathBuf,

    /// Token display name
    #[arg(long, default_value = DEFAULT_NAME)]
    name: String,

    /// Token symbol
    #[arg(long, default_value = DEFAULT_SYMBOL)]
    symbol: String,
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
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(rpc_url) = cli.rpc_url {
        config.rpc_url = Some(rpc_url);
    }
    let network = config.network_config();

    let artifact = Artifact::from_file(&cli.artifact)?;
    let code = artifact.deployment_code(&cli.name, &cli.symbol)?;

    let wallet = LocalWallet::from_private_keys(&cli.private_keys)?
        .ok_or_else(|| eyre::eyre!("A deployer private key is required"))?;

    info!(
        network = %network.network_type,
        rpc_url = %network.default_rpc_url,
        deployer = %wallet.active(),
        name = %cli.name,
        symbol = %cli.symbol,
        "Deploying token"
    );

    let provider = client::create_wallet_provider(&network.default_rpc_url, &wallet)?;
    let address = deploy_token(&provider, code).await?;

    println!("CONTRACT ADDRESS: {address}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_0: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const KEY_1: &str = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

    #[test]
    fn test_key_list_deploys_from_first_key() {
        let keys = format!("{KEY_0},{KEY_1}");
        let cli = Cli::try_parse_from(["deploy", "--private-key", keys.as_str()]).unwrap();

        assert_eq!(cli.private_keys, vec![KEY_0.to_string(), KEY_1.to_string()]);

        let wallet = LocalWallet::from_private_keys(&cli.private_keys)
            .unwrap()
            .unwrap();
        assert_eq!(
            wallet.active(),
            alloy_primitives::address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
        );
    }
}
