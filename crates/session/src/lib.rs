//! Token session: keeps a small view state in sync with a token contract.
//!
//! The [`Synchronizer`] owns a [`ViewState`] (metadata, balance, pending
//! writes, drafts, banner) and reconciles it with two capabilities:
//! a [`Wallet`] for accounts and a [`TokenContract`] for reads, writes and
//! completion events. [`TokenClient`] implements the contract capability on
//! top of an alloy provider; `client::LocalWallet` implements the wallet.

pub mod amount;
pub mod capability;
mod error;
pub mod metrics;
pub mod state;
pub mod synchronizer;
pub mod token;

pub use capability::{TokenContract, TokenEvent, TokenEvents, Wallet};
pub use error::{SyncError, WALLET_MISSING_MESSAGE};
pub use state::{ActionKind, ViewState};
pub use synchronizer::{Command, SessionConfig, Synchronizer};
pub use token::TokenClient;

#[cfg(test)]
pub(crate) mod test_utils {
    use crate::{
        capability::{TokenContract, TokenEvent, TokenEvents, Wallet},
        SyncError,
    };
    use alloy_primitives::{address, Address, TxHash, U256};
    use futures::{channel::mpsc, StreamExt};
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
    };
    use tokio::sync::watch;

    pub const ALICE: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
    pub const BOB: Address = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");

    /// `n` whole tokens in base units.
    pub fn ether(n: u64) -> U256 {
        U256::from(n) * U256::from(10).pow(U256::from(18))
    }

    /// Mock wallet whose account list can be switched from the test.
    #[derive(Clone)]
    pub struct MockWallet {
        accounts: Arc<watch::Sender<Vec<Address>>>,
        refusal: Arc<Mutex<Option<String>>>,
    }

    impl MockWallet {
        pub fn new(accounts: Vec<Address>) -> Self {
            let (accounts, _) = watch::channel(accounts);
            Self {
                accounts: Arc::new(accounts),
                refusal: Arc::new(Mutex::new(None)),
            }
        }

        pub fn switch(&self, accounts: Vec<Address>) {
            self.accounts.send_replace(accounts);
        }

        /// Refuse account access with `message`.
        pub fn refuse(&self, message: &str) {
            *self.refusal.lock().unwrap() = Some(message.to_string());
        }
    }

    impl Wallet for MockWallet {
        async fn request_accounts(&self) -> Result<Vec<Address>, SyncError> {
            let refusal = self.refusal.lock().unwrap().clone();
            if let Some(message) = refusal {
                return Err(SyncError::Call(message));
            }
            Ok(self.accounts.borrow().clone())
        }

        fn account_changes(&self) -> watch::Receiver<Vec<Address>> {
            self.accounts.subscribe()
        }
    }

    /// A write the mock token received.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum WriteCall {
        Mint {
            caller: Address,
            amount: U256,
        },
        Burn {
            caller: Address,
            amount: U256,
        },
        Transfer {
            caller: Address,
            to: Address,
            amount: U256,
        },
    }

    struct TokenState {
        total_supply: U256,
        balances: HashMap<Address, U256>,
        owner: Address,
        fail_reads: bool,
        write_error: Option<String>,
        writes: Vec<WriteCall>,
        listeners: Vec<mpsc::UnboundedSender<TokenEvent>>,
    }

    /// In-memory token with scriptable failures.
    ///
    /// Writes are only recorded; balances change when the test says so.
    #[derive(Clone)]
    pub struct MockToken {
        inner: Arc<Mutex<TokenState>>,
    }

    impl Default for MockToken {
        fn default() -> Self {
            Self {
                inner: Arc::new(Mutex::new(TokenState {
                    total_supply: ether(1000),
                    balances: HashMap::new(),
                    owner: ALICE,
                    fail_reads: false,
                    write_error: None,
                    writes: Vec::new(),
                    listeners: Vec::new(),
                })),
            }
        }
    }

    impl MockToken {
        pub fn set_balance(&self, holder: Address, amount: U256) {
            self.inner.lock().unwrap().balances.insert(holder, amount);
        }

        pub fn set_total_supply(&self, amount: U256) {
            self.inner.lock().unwrap().total_supply = amount;
        }

        pub fn set_owner(&self, owner: Address) {
            self.inner.lock().unwrap().owner = owner;
        }

        pub fn fail_reads(&self, fail: bool) {
            self.inner.lock().unwrap().fail_reads = fail;
        }

        pub fn fail_writes(&self, message: &str) {
            self.inner.lock().unwrap().write_error = Some(message.to_string());
        }

        pub fn writes(&self) -> Vec<WriteCall> {
            self.inner.lock().unwrap().writes.clone()
        }

        pub fn subscriptions(&self) -> usize {
            self.inner.lock().unwrap().listeners.len()
        }

        /// Deliver `event` to every subscriber.
        pub fn emit(&self, event: TokenEvent) {
            let state = self.inner.lock().unwrap();
            for listener in &state.listeners {
                let _ = listener.unbounded_send(event.clone());
            }
        }

        fn read<T>(&self, f: impl FnOnce(&TokenState) -> T) -> Result<T, SyncError> {
            let state = self.inner.lock().unwrap();
            if state.fail_reads {
                return Err(SyncError::Call("execution reverted".to_string()));
            }
            Ok(f(&state))
        }

        fn write(&self, call: WriteCall) -> Result<TxHash, SyncError> {
            let mut state = self.inner.lock().unwrap();
            if let Some(message) = &state.write_error {
                return Err(SyncError::Call(message.clone()));
            }
            state.writes.push(call);
            Ok(TxHash::with_last_byte(state.writes.len() as u8))
        }
    }

    impl TokenContract for MockToken {
        async fn name(&self) -> Result<String, SyncError> {
            self.read(|_| "KENYA".to_string())
        }

        async fn symbol(&self) -> Result<String, SyncError> {
            self.read(|_| "KE".to_string())
        }

        async fn total_supply(&self) -> Result<U256, SyncError> {
            self.read(|s| s.total_supply)
        }

        async fn balance(&self, caller: Address) -> Result<U256, SyncError> {
            self.read(|s| s.balances.get(&caller).copied().unwrap_or_default())
        }

        async fn is_owner(&self, caller: Address) -> Result<bool, SyncError> {
            self.read(|s| s.owner == caller)
        }

        async fn mint(&self, caller: Address, amount: U256) -> Result<TxHash, SyncError> {
            self.write(WriteCall::Mint { caller, amount })
        }

        async fn burn(&self, caller: Address, amount: U256) -> Result<TxHash, SyncError> {
            self.write(WriteCall::Burn { caller, amount })
        }

        async fn transfer_funds(
            &self,
            caller: Address,
            to: Address,
            amount: U256,
        ) -> Result<TxHash, SyncError> {
            self.write(WriteCall::Transfer { caller, to, amount })
        }

        async fn events(&self) -> Result<TokenEvents, SyncError> {
            let (tx, rx) = mpsc::unbounded();
            self.inner.lock().unwrap().listeners.push(tx);
            Ok(rx.boxed())
        }
    }
}
