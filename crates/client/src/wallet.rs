//! Local multi-account wallet.
//!
//! Holds one or more private keys. The first account is the active one; it
//! is what `eth_requestAccounts` would return first in a browser wallet.
//! Switching accounts reorders the list and notifies every subscriber.

use crate::ClientError;
use alloy_network::EthereumWallet;
use alloy_primitives::Address;
use alloy_signer_local::PrivateKeySigner;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

/// A wallet backed by local private keys.
#[derive(Debug, Clone)]
pub struct LocalWallet {
    signers: Arc<Vec<PrivateKeySigner>>,
    accounts: Arc<watch::Sender<Vec<Address>>>,
}

impl LocalWallet {
    /// Build a wallet from hex private keys (with or without `0x` prefix).
    ///
    /// Returns `Ok(None)` when no keys are given: the caller runs without a
    /// wallet capability.
    pub fn from_private_keys<I, S>(keys: I) -> Result<Option<Self>, ClientError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let signers = keys
            .into_iter()
            .map(|key| {
                key.as_ref()
                    .trim()
                    .parse::<PrivateKeySigner>()
                    .map_err(|e| ClientError::InvalidPrivateKey(format!("{}", e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if signers.is_empty() {
            return Ok(None);
        }

        Ok(Some(Self::new(signers)))
    }

    fn new(signers: Vec<PrivateKeySigner>) -> Self {
        let addresses = signers.iter().map(|s| s.address()).collect();
        let (accounts, _) = watch::channel(addresses);

        Self {
            signers: Arc::new(signers),
            accounts: Arc::new(accounts),
        }
    }

    /// Accounts in selection order, active account first.
    pub fn accounts(&self) -> Vec<Address> {
        self.accounts.borrow().clone()
    }

    /// The active account.
    pub fn active(&self) -> Address {
        self.accounts.borrow()[0]
    }

    /// Subscribe to account changes.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Address>> {
        self.accounts.subscribe()
    }

    /// Make `address` the active account.
    pub fn switch_account(&self, address: Address) -> Result<(), ClientError> {
        let mut accounts = self.accounts();
        let Some(position) = accounts.iter().position(|a| *a == address) else {
            return Err(ClientError::UnknownAccount(address));
        };

        let selected = accounts.remove(position);
        accounts.insert(0, selected);

        info!(account = %address, "Switched active account");
        self.accounts.send_replace(accounts);

        Ok(())
    }

    /// An alloy wallet holding every key.
    ///
    /// The active account at call time becomes the default signer; any other
    /// account signs when it is set as the transaction's `from`.
    pub fn ethereum_wallet(&self) -> EthereumWallet {
        let active = self.active();
        let default = self
            .signers
            .iter()
            .find(|s| s.address() == active)
            .unwrap_or(&self.signers[0]);

        let mut wallet = EthereumWallet::from(default.clone());
        for signer in self.signers.iter().filter(|s| s.address() != active) {
            wallet.register_signer(signer.clone());
        }
        wallet
    }
}
