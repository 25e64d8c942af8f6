//! Deployment tests.
//!
//! The artifact tests run offline. The deployment test needs a dev node and a
//! funded key (see `setup.rs`):
//! ```bash
//! cargo test --package tokenctl --test deploy -- --ignored
//! ```

#[path = "setup.rs"]
mod setup;

use alloy_provider::Provider;
use alloy_sol_types::SolValue;
use setup::{load_test_config, setup_wallet};
use tokenctl::deploy::{constructor_args, deploy_token, Artifact, DEFAULT_NAME, DEFAULT_SYMBOL};

const FIXTURE: &str = "tests/fixtures/ERC20Token.json";

#[test]
fn test_hardhat_artifact_fixture() {
    let artifact = Artifact::from_file(FIXTURE).expect("Failed to load fixture");

    assert_eq!(artifact.contract_name.as_deref(), Some("ERC20Token"));
    assert_eq!(artifact.bytecode().as_ref(), &[0x60, 0x80, 0x60, 0x40, 0x52]);

    let code = artifact
        .deployment_code(DEFAULT_NAME, DEFAULT_SYMBOL)
        .expect("Failed to build deployment code");
    let (name, symbol) = <(String, String)>::abi_decode_params(&code[5..]).unwrap();

    assert_eq!(name, "KENYA");
    assert_eq!(symbol, "KE");
}

#[test]
fn test_missing_artifact_is_an_error() {
    assert!(Artifact::from_file("tests/fixtures/missing.json").is_err());
}

#[test]
fn test_constructor_args_are_word_aligned() {
    let encoded = constructor_args("KENYA", "KE");

    // two offsets, then length + one padded word per string
    assert_eq!(encoded.len(), 6 * 32);
}

#[tokio::test]
#[ignore = "requires a dev node and the compiled token artifact"]
async fn test_deploy_token_to_dev_node() {
    let config = load_test_config();
    let network = config.network_config();
    let wallet = setup_wallet();
    let provider = client::create_wallet_provider(&network.default_rpc_url, &wallet)
        .expect("Failed to create wallet provider");

    let artifact = Artifact::from_file("artifacts/contracts/ERC20Token.sol/ERC20Token.json")
        .expect("Compile the token contract first");
    let code = artifact
        .deployment_code(DEFAULT_NAME, DEFAULT_SYMBOL)
        .unwrap();

    let address = deploy_token(&provider, code).await.expect("Deployment failed");
    println!("CONTRACT ADDRESS: {address}");

    let deployed = provider.get_code_at(address).await.unwrap();
    assert!(!deployed.is_empty());
}
