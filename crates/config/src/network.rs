//! Network configuration for the token console.
//!
//! Provides chain-specific parameters and the default token deployment for
//! each supported network (local dev chain, Sepolia).

use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Network name not recognised
    #[error("Unknown network `{0}` (expected `local` or `sepolia`)")]
    UnknownNetwork(String),
}

/// Network type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    /// Local development node (hardhat / anvil)
    Local,
    Sepolia,
}

impl FromStr for NetworkType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" | "localhost" | "dev" => Ok(Self::Local),
            "sepolia" | "testnet" => Ok(Self::Sepolia),
            _ => Err(ConfigError::UnknownNetwork(s.to_string())),
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Sepolia => write!(f, "sepolia"),
        }
    }
}

/// Complete network configuration for talking to the token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Network type
    pub network_type: NetworkType,
    /// Chain ID
    pub chain_id: u64,
    /// RPC endpoint used when the config file does not name one
    pub default_rpc_url: String,
    /// Token contract address
    pub token: Address,
    /// Token decimals (fixed-point scale of every amount)
    pub decimals: u8,
}

impl NetworkConfig {
    /// Local dev chain configuration.
    ///
    /// The token address is the first contract created by the default dev
    /// account, which is where `deploy` lands on a fresh node.
    pub fn local() -> Self {
        Self {
            network_type: NetworkType::Local,
            chain_id: 31337,
            default_rpc_url: "http://127.0.0.1:8545".to_string(),
            token: address!("0x5FbDB2315678afecb367f032d93F642f64180aa3"),
            decimals: 18,
        }
    }

    /// Sepolia testnet configuration.
    pub fn sepolia() -> Self {
        Self {
            network_type: NetworkType::Sepolia,
            chain_id: 11155111,
            default_rpc_url: "https://ethereum-sepolia-rpc.publicnode.com".to_string(),
            token: address!("0x7483929cE584f84c415f83A769F9B8268d7E9743"),
            decimals: 18,
        }
    }

    /// Create configuration from network type.
    pub fn from_network_type(network_type: NetworkType) -> Self {
        match network_type {
            NetworkType::Local => Self::local(),
            NetworkType::Sepolia => Self::sepolia(),
        }
    }
}

/// Builder for custom network configurations.
#[derive(Debug, Clone)]
pub struct NetworkConfigBuilder {
    config: NetworkConfig,
}

impl NetworkConfigBuilder {
    /// Start from the defaults of `network_type`.
    pub fn new(network_type: NetworkType) -> Self {
        Self {
            config: NetworkConfig::from_network_type(network_type),
        }
    }

    /// Start with local dev chain defaults.
    pub fn local() -> Self {
        Self::new(NetworkType::Local)
    }

    /// Start with Sepolia defaults.
    pub fn sepolia() -> Self {
        Self::new(NetworkType::Sepolia)
    }

    /// Override the token contract address.
    pub const fn token(mut self, address: Address) -> Self {
        self.config.token = address;
        self
    }

    /// Override the token decimals.
    pub const fn decimals(mut self, decimals: u8) -> Self {
        self.config.decimals = decimals;
        self
    }

    /// Override the default RPC URL.
    pub fn rpc_url(mut self, url: impl Into<String>) -> Self {
        self.config.default_rpc_url = url.into();
        self
    }

    /// Build the network configuration.
    pub fn build(self) -> NetworkConfig {
        self.config
    }
}
