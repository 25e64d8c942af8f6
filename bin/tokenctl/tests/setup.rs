//! Common test setup utilities shared across integration tests.
#![allow(dead_code)] // used in ignored tests

use client::LocalWallet;
use serde::Deserialize;
use tokenctl::config::Config;

/// Local configuration with private key (git-ignored file)
#[derive(Debug, Deserialize)]
struct LocalConfig {
    private_key: String,
}

/// Load test configuration. Panics if not found or invalid.
pub fn load_test_config() -> Config {
    let config_path = "tests/test-config.toml";
    Config::from_file(config_path).expect("Failed to load tests/test-config.toml.")
}

/// Load private key for signing transactions.
///
/// Tries the PRIVATE_KEY environment variable, then
/// tests/test-config.local.toml (git-ignored).
pub fn load_private_key() -> Option<String> {
    if let Ok(pk) = std::env::var("PRIVATE_KEY") {
        eprintln!("Loaded private key from PRIVATE_KEY environment variable");
        return Some(pk);
    }

    let local_config_path = "tests/test-config.local.toml";
    if let Ok(contents) = std::fs::read_to_string(local_config_path) {
        if let Ok(config) = toml::from_str::<LocalConfig>(&contents) {
            eprintln!("Loaded private key from {local_config_path}");
            return Some(config.private_key);
        }
    }

    eprintln!("No private key found in PRIVATE_KEY or tests/test-config.local.toml");
    None
}

/// Build a wallet from the configured private key.
///
/// # Panics
/// Panics if no private key is found or if it is invalid.
pub fn setup_wallet() -> LocalWallet {
    let private_key = load_private_key().expect(
        "Private key required for transaction signing.\n\
         Set PRIVATE_KEY environment variable or create tests/test-config.local.toml",
    );

    LocalWallet::from_private_keys([private_key])
        .expect("Invalid private key format")
        .expect("At least one key")
}
