//! Configuration types for the token console.
//!
//! This crate provides:
//! - Network presets (local dev chain, Sepolia)
//! - The token deployment address per network
//! - A builder for overriding preset values

pub mod network;

pub use network::{ConfigError, NetworkConfig, NetworkConfigBuilder, NetworkType};
