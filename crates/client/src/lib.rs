mod wallet;

use alloy_primitives::Address;
use alloy_provider::{Provider, ProviderBuilder};
use thiserror::Error;
pub use wallet::LocalWallet;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Error parsing or validating URLs
    #[error("Invalid RPC URL: {0}")]
    InvalidUrl(String),

    /// Error with private key
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// Account is not held by the wallet
    #[error("Unknown account: {0}")]
    UnknownAccount(Address),
}

/// Convenience function to create an ethereum rpc provider from url.
pub fn create_provider(rpc_url: &str) -> Result<impl Provider + Clone, ClientError> {
    let url = rpc_url
        .parse()
        .map_err(|e| ClientError::InvalidUrl(format!("{}", e)))?;
    let provider = ProviderBuilder::new().connect_http(url);

    Ok(provider)
}

/// Create a provider that signs with every account held by `wallet`.
pub fn create_wallet_provider(
    rpc_url: &str,
    wallet: &LocalWallet,
) -> Result<impl Provider + Clone, ClientError> {
    let url = rpc_url
        .parse()
        .map_err(|e| ClientError::InvalidUrl(format!("{}", e)))?;

    let provider = ProviderBuilder::new()
        .wallet(wallet.ethereum_wallet())
        .connect_http(url);

    Ok(provider)
}
