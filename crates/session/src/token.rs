use crate::{
    capability::{TokenContract, TokenEvent, TokenEvents},
    SyncError,
};
use alloy_primitives::{Address, TxHash, U256};
use alloy_provider::Provider;
use alloy_rpc_types::Log;
use binding::IERC20Token::{self, IERC20TokenInstance};
use futures::{future, stream, StreamExt};
use tracing::{debug, info, warn};

/// Token contract capability backed by an alloy provider.
///
/// The contract instance is built once and reused for every call.
pub struct TokenClient<P> {
    contract: IERC20TokenInstance<P>,
}

impl<P> TokenClient<P>
where
    P: Provider + Clone,
{
    pub fn new(address: Address, provider: P) -> Self {
        Self {
            contract: IERC20Token::new(address, provider),
        }
    }

    pub fn address(&self) -> &Address {
        self.contract.address()
    }
}

impl<P> TokenContract for TokenClient<P>
where
    P: Provider + Clone,
{
    async fn name(&self) -> Result<String, SyncError> {
        debug!(token = %self.address(), "Reading name");
        self.contract.name().call().await.map_err(SyncError::call)
    }

    async fn symbol(&self) -> Result<String, SyncError> {
        debug!(token = %self.address(), "Reading symbol");
        self.contract.symbol().call().await.map_err(SyncError::call)
    }

    async fn total_supply(&self) -> Result<U256, SyncError> {
        debug!(token = %self.address(), "Reading total supply");
        self.contract
            .totalSupply()
            .call()
            .await
            .map_err(SyncError::call)
    }

    async fn balance(&self, caller: Address) -> Result<U256, SyncError> {
        debug!(token = %self.address(), caller = %caller, "Reading balance");
        self.contract
            .getBalance()
            .from(caller)
            .call()
            .await
            .map_err(SyncError::call)
    }

    async fn is_owner(&self, caller: Address) -> Result<bool, SyncError> {
        debug!(token = %self.address(), caller = %caller, "Reading owner flag");
        self.contract
            .checkOwner()
            .from(caller)
            .call()
            .await
            .map_err(SyncError::call)
    }

    async fn mint(&self, caller: Address, amount: U256) -> Result<TxHash, SyncError> {
        let pending = self
            .contract
            .mint(amount)
            .from(caller)
            .send()
            .await
            .map_err(SyncError::call)?;

        let tx_hash = *pending.tx_hash();
        info!(tx_hash = %tx_hash, caller = %caller, %amount, "Mint submitted");
        Ok(tx_hash)
    }

    async fn burn(&self, caller: Address, amount: U256) -> Result<TxHash, SyncError> {
        let pending = self
            .contract
            .burn(amount)
            .from(caller)
            .send()
            .await
            .map_err(SyncError::call)?;

        let tx_hash = *pending.tx_hash();
        info!(tx_hash = %tx_hash, caller = %caller, %amount, "Burn submitted");
        Ok(tx_hash)
    }

    async fn transfer_funds(
        &self,
        caller: Address,
        to: Address,
        amount: U256,
    ) -> Result<TxHash, SyncError> {
        let pending = self
            .contract
            .transferFunds(to, amount)
            .from(caller)
            .send()
            .await
            .map_err(SyncError::call)?;

        let tx_hash = *pending.tx_hash();
        info!(tx_hash = %tx_hash, caller = %caller, to = %to, %amount, "Transfer submitted");
        Ok(tx_hash)
    }

    async fn events(&self) -> Result<TokenEvents, SyncError> {
        let minted = self
            .contract
            .MintMore_filter()
            .watch()
            .await
            .map_err(SyncError::call)?
            .into_stream()
            .filter_map(|item| {
                future::ready(decoded("MintMore", item).map(|(event, log)| TokenEvent::Minted {
                    amount: event.amount,
                    message: event.message,
                    tx_hash: log.transaction_hash,
                }))
            });

        let burned = self
            .contract
            .BurnToken_filter()
            .watch()
            .await
            .map_err(SyncError::call)?
            .into_stream()
            .filter_map(|item| {
                future::ready(decoded("BurnToken", item).map(|(event, log)| TokenEvent::Burned {
                    amount: event.amount,
                    message: event.message,
                    tx_hash: log.transaction_hash,
                }))
            });

        let transferred = self
            .contract
            .TransferFund_filter()
            .watch()
            .await
            .map_err(SyncError::call)?
            .into_stream()
            .filter_map(|item| {
                future::ready(decoded("TransferFund", item).map(|(event, log)| {
                    TokenEvent::Transferred {
                        amount: event.amount,
                        to: event.to,
                        message: event.message,
                        tx_hash: log.transaction_hash,
                    }
                }))
            });

        info!(token = %self.address(), "Watching token events");

        Ok(stream::select_all([minted.boxed(), burned.boxed(), transferred.boxed()]).boxed())
    }
}

/// Drop undecodable logs with a warning.
fn decoded<E>(event: &'static str, item: alloy_sol_types::Result<(E, Log)>) -> Option<(E, Log)> {
    match item {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            warn!(event, error = %e, "Failed to decode token event");
            None
        }
    }
}
