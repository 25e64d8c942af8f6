//! Live session tests against a dev node with the token deployed.
//!
//! Uses `tests/test-config.toml` and a funded owner key (see `setup.rs`):
//! ```bash
//! cargo test --package tokenctl --test session -- --ignored
//! ```

#[path = "setup.rs"]
mod setup;

use futures::StreamExt;
use session::{ActionKind, Synchronizer, TokenClient, TokenContract, TokenEvent};
use setup::{load_test_config, setup_wallet};
use std::time::Duration;

#[tokio::test]
#[ignore = "requires a dev node with the token deployed"]
async fn test_read_only_metadata() {
    let config = load_test_config();
    let network = config.network_config();

    let provider = client::create_provider(&network.default_rpc_url).unwrap();
    let token = TokenClient::new(network.token, provider);
    let mut session =
        Synchronizer::<client::LocalWallet, _>::new(None, token, config.session_config());

    session.resync().await;

    let state = session.state();
    println!(
        "{} ({}) supply {}",
        state.metadata.name, state.metadata.symbol, state.metadata.total_supply
    );
    assert!(!state.metadata.name.is_empty());
    assert!(!state.wallet.connected);
    assert!(state.banner.visible);
}

#[tokio::test]
#[ignore = "requires a dev node with the token deployed"]
async fn test_mint_round_trip() {
    let config = load_test_config();
    let network = config.network_config();
    let wallet = setup_wallet();

    let provider = client::create_wallet_provider(&network.default_rpc_url, &wallet).unwrap();
    let token = TokenClient::new(network.token, provider);
    let mut events = token.events().await.expect("Failed to subscribe");

    let mut session = Synchronizer::new(Some(wallet), token, config.session_config());
    session.resync().await;
    assert!(session.state().wallet.connected);

    let tx_hash = session.submit_mint("1").await.expect("Mint rejected");
    println!("Mint tx: {tx_hash:?}");
    assert!(tx_hash.is_some());
    assert!(session.state().pending.is_pending(ActionKind::Mint));

    let event = tokio::time::timeout(Duration::from_secs(30), async {
        loop {
            match events.next().await {
                Some(event @ TokenEvent::Minted { .. }) => return event,
                Some(_) => continue,
                None => panic!("Event stream ended"),
            }
        }
    })
    .await
    .expect("No mint event within 30s");

    session.apply_event(event).await;

    let state = session.state();
    assert!(!state.pending.is_pending(ActionKind::Mint));
    assert!(state.banner.visible);
    assert!(state.mint_draft.is_empty());
}
