//! Capabilities the synchronizer consumes.
//!
//! The wallet owns keys and account selection; the token contract owns all
//! balance and ownership logic. Both are black boxes behind these traits.

use crate::SyncError;
use alloy_primitives::{Address, TxHash, U256};
use client::LocalWallet;
use futures::stream::BoxStream;
use std::future::Future;
use tokio::sync::watch;

/// Account access and account-change notifications.
pub trait Wallet: Send + Sync {
    /// Request account access. The first account is the active one.
    fn request_accounts(&self) -> impl Future<Output = Result<Vec<Address>, SyncError>> + Send;

    /// Subscribe to account changes (active account first).
    fn account_changes(&self) -> watch::Receiver<Vec<Address>>;
}

/// Notification emitted by the token contract after a write completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenEvent {
    /// `MintMore(amount, message)`
    Minted {
        amount: U256,
        message: String,
        tx_hash: Option<TxHash>,
    },
    /// `BurnToken(amount, message)`
    Burned {
        amount: U256,
        message: String,
        tx_hash: Option<TxHash>,
    },
    /// `TransferFund(amount, to, message)`
    Transferred {
        amount: U256,
        to: Address,
        message: String,
        tx_hash: Option<TxHash>,
    },
}

impl TokenEvent {
    pub fn message(&self) -> &str {
        match self {
            Self::Minted { message, .. }
            | Self::Burned { message, .. }
            | Self::Transferred { message, .. } => message,
        }
    }

    pub const fn tx_hash(&self) -> Option<TxHash> {
        match self {
            Self::Minted { tx_hash, .. }
            | Self::Burned { tx_hash, .. }
            | Self::Transferred { tx_hash, .. } => *tx_hash,
        }
    }
}

/// Stream of contract notifications, in arrival order.
pub type TokenEvents = BoxStream<'static, TokenEvent>;

/// Fixed read/write/notification surface of the token contract.
///
/// Reads and writes that depend on `msg.sender` take the caller explicitly.
/// Writes resolve once the transaction is accepted, not once it is mined.
pub trait TokenContract: Send + Sync {
    fn name(&self) -> impl Future<Output = Result<String, SyncError>> + Send;

    fn symbol(&self) -> impl Future<Output = Result<String, SyncError>> + Send;

    fn total_supply(&self) -> impl Future<Output = Result<U256, SyncError>> + Send;

    /// Balance of `caller`.
    fn balance(&self, caller: Address) -> impl Future<Output = Result<U256, SyncError>> + Send;

    /// Whether `caller` owns the contract.
    fn is_owner(&self, caller: Address) -> impl Future<Output = Result<bool, SyncError>> + Send;

    fn mint(
        &self,
        caller: Address,
        amount: U256,
    ) -> impl Future<Output = Result<TxHash, SyncError>> + Send;

    fn burn(
        &self,
        caller: Address,
        amount: U256,
    ) -> impl Future<Output = Result<TxHash, SyncError>> + Send;

    fn transfer_funds(
        &self,
        caller: Address,
        to: Address,
        amount: U256,
    ) -> impl Future<Output = Result<TxHash, SyncError>> + Send;

    /// Start listening for `MintMore`, `BurnToken` and `TransferFund`.
    fn events(&self) -> impl Future<Output = Result<TokenEvents, SyncError>> + Send;
}

impl Wallet for LocalWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, SyncError> {
        Ok(self.accounts())
    }

    fn account_changes(&self) -> watch::Receiver<Vec<Address>> {
        self.subscribe()
    }
}
