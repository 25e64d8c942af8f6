use alloy_primitives::Address;
use ::config::{NetworkConfig, NetworkConfigBuilder, NetworkType};
use serde::{Deserialize, Serialize};
use session::SessionConfig;
use std::{path::Path, time::Duration};

/// Top-level console configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Network preset
    #[serde(default = "default_network")]
    pub network: NetworkType,

    /// RPC endpoint url (defaults to the network preset)
    #[serde(default)]
    pub rpc_url: Option<String>,

    /// Token contract address (defaults to the network preset)
    #[serde(default)]
    pub token_address: Option<Address>,

    /// Token decimals (defaults to the network preset)
    #[serde(default)]
    pub token_decimals: Option<u8>,

    /// Seconds a submitted write may wait for its completion event
    #[serde(default = "default_pending_timeout_secs")]
    pub pending_timeout_secs: u64,

    /// Serve Prometheus metrics on this port
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

const fn default_network() -> NetworkType {
    NetworkType::Local
}

const fn default_pending_timeout_secs() -> u64 {
    300
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: default_network(),
            rpc_url: None,
            token_address: None,
            token_decimals: None,
            pending_timeout_secs: default_pending_timeout_secs(),
            metrics_port: None,
        }
    }
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;

        Ok(config)
    }

    /// Network preset with the file's overrides applied.
    pub fn network_config(&self) -> NetworkConfig {
        let mut builder = NetworkConfigBuilder::new(self.network);
        if let Some(token) = self.token_address {
            builder = builder.token(token);
        }
        if let Some(decimals) = self.token_decimals {
            builder = builder.decimals(decimals);
        }
        if let Some(url) = &self.rpc_url {
            builder = builder.rpc_url(url.clone());
        }
        builder.build()
    }

    /// Session tuning; amounts use the network's token decimals.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            pending_timeout: Duration::from_secs(self.pending_timeout_secs),
            decimals: self.network_config().decimals,
            ..SessionConfig::default()
        }
    }
}
