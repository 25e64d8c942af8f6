//! One-shot token deployment.
//!
//! Reads a compiled contract artifact, appends the ABI-encoded constructor
//! arguments `(string name, string symbol)` and sends the creation
//! transaction.

use alloy_network::TransactionBuilder;
use alloy_primitives::{Address, Bytes};
use alloy_provider::Provider;
use alloy_rpc_types::TransactionRequest;
use alloy_sol_types::SolValue;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Constructor arguments used when none are given.
pub const DEFAULT_NAME: &str = "KENYA";
pub const DEFAULT_SYMBOL: &str = "KE";

/// Creation bytecode as found in build artifacts.
///
/// Hardhat and Truffle store a hex string; Foundry nests it under `object`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Bytecode {
    Hex(Bytes),
    Object { object: Bytes },
}

/// A compiled contract artifact.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    #[serde(default)]
    pub contract_name: Option<String>,
    bytecode: Bytecode,
}

impl Artifact {
    pub fn from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> eyre::Result<Self> {
        let artifact: Self = serde_json::from_str(json)?;
        Ok(artifact)
    }

    /// Creation bytecode without constructor arguments.
    pub const fn bytecode(&self) -> &Bytes {
        match &self.bytecode {
            Bytecode::Hex(code) | Bytecode::Object { object: code } => code,
        }
    }

    /// Creation bytecode followed by the encoded constructor arguments.
    pub fn deployment_code(&self, name: &str, symbol: &str) -> eyre::Result<Bytes> {
        let bytecode = self.bytecode();
        if bytecode.is_empty() {
            eyre::bail!(
                "Artifact {} has no bytecode (interface or abstract contract?)",
                self.contract_name.as_deref().unwrap_or("<unnamed>")
            );
        }

        let mut code = bytecode.to_vec();
        code.extend_from_slice(&constructor_args(name, symbol));
        Ok(code.into())
    }
}

/// ABI-encode the token constructor parameters.
pub fn constructor_args(name: &str, symbol: &str) -> Vec<u8> {
    (name.to_string(), symbol.to_string()).abi_encode_params()
}

/// Send the creation transaction and wait for the contract address.
pub async fn deploy_token<P>(provider: &P, code: Bytes) -> eyre::Result<Address>
where
    P: Provider,
{
    let tx = TransactionRequest::default().with_deploy_code(code);

    let pending = provider.send_transaction(tx).await?;
    info!(tx_hash = %pending.tx_hash(), "Deployment submitted");

    let receipt = pending.get_receipt().await?;
    if !receipt.status() {
        eyre::bail!(
            "Deployment transaction {} reverted",
            receipt.transaction_hash
        );
    }

    let address = receipt
        .contract_address
        .ok_or_else(|| eyre::eyre!("Receipt has no contract address"))?;

    info!(
        tx_hash = %receipt.transaction_hash,
        block_number = ?receipt.block_number,
        gas_used = receipt.gas_used,
        contract = %address,
        "Token deployed"
    );

    Ok(address)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor_args_decode_back() {
        let encoded = constructor_args("KENYA", "KE");
        let (name, symbol) = <(String, String)>::abi_decode_params(&encoded).unwrap();

        assert_eq!(name, "KENYA");
        assert_eq!(symbol, "KE");
    }

    #[test]
    fn test_deployment_code_appends_args() {
        let artifact =
            Artifact::from_json(r#"{"contractName":"ERC20Token","bytecode":"0x6080604052"}"#)
                .unwrap();

        let code = artifact.deployment_code("KENYA", "KE").unwrap();

        assert!(code.starts_with(&[0x60, 0x80, 0x60, 0x40, 0x52]));
        assert_eq!(&code[5..], constructor_args("KENYA", "KE").as_slice());
    }

    #[test]
    fn test_foundry_artifact_layout() {
        let artifact =
            Artifact::from_json(r#"{"bytecode":{"object":"0x6080"}}"#).unwrap();

        assert_eq!(artifact.bytecode().as_ref(), &[0x60, 0x80]);
        assert!(artifact.contract_name.is_none());
    }

    #[test]
    fn test_empty_bytecode_is_rejected() {
        let artifact =
            Artifact::from_json(r#"{"contractName":"IERC20","bytecode":"0x"}"#).unwrap();

        let err = artifact.deployment_code("KENYA", "KE").unwrap_err();
        assert!(err.to_string().contains("IERC20"));
    }
}
