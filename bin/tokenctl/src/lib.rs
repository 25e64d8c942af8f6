pub mod config;
pub mod console;
pub mod deploy;
pub mod metrics;

use ::config::NetworkConfig;
use client::LocalWallet;
use eyre::Result;
use session::{SessionConfig, Synchronizer, TokenClient};
use tracing::info;

/// Open a session against `network` and hand it to the console.
///
/// With a wallet the provider signs as the wallet's accounts; without one
/// reads still work and the session reports the missing wallet.
pub async fn run_session(
    network: &NetworkConfig,
    session_config: SessionConfig,
    wallet: Option<LocalWallet>,
) -> Result<()> {
    let rpc_url = network.default_rpc_url.as_str();
    info!(token = %network.token, chain_id = network.chain_id, rpc_url, "Opening token session");

    let Some(wallet) = wallet else {
        let provider = client::create_provider(rpc_url)?;
        let token = TokenClient::new(network.token, provider);
        let session = Synchronizer::new(None, token, session_config);
        return console::run_console(session, None).await;
    };

    let provider = client::create_wallet_provider(rpc_url, &wallet)?;
    let token = TokenClient::new(network.token, provider);
    let session = Synchronizer::new(Some(wallet.clone()), token, session_config);
    console::run_console(session, Some(wallet)).await
}
