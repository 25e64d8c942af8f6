//! The view-state synchronizer.
//!
//! Owns the [`ViewState`] and reconciles it with the wallet and token
//! capabilities. Handlers can be called directly; [`Synchronizer::run`]
//! drives them from a command channel, the contract event stream, wallet
//! account changes and a timeout sweep, publishing a snapshot after each
//! message.

use crate::{
    amount::{format_amount, to_base_units, TOKEN_DECIMALS},
    capability::{TokenContract, TokenEvent, TokenEvents, Wallet},
    metrics::Metrics,
    state::{ActionKind, PendingAction, TokenMetadata, TransferDraft, ViewState},
    SyncError, WALLET_MISSING_MESSAGE,
};
use alloy_primitives::{Address, TxHash, U256};
use futures::{stream, StreamExt};
use std::time::Duration;
use tokio::{
    sync::{mpsc, watch},
    time::{self, Instant, MissedTickBehavior},
};
use tracing::{debug, info, warn};

/// Session tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// How long an accepted write may wait for its completion event
    pub pending_timeout: Duration,
    /// How often pending writes are checked against the timeout
    pub sweep_interval: Duration,
    /// Fixed-point scale of token amounts
    pub decimals: u8,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            pending_timeout: Duration::from_secs(300),
            sweep_interval: Duration::from_secs(1),
            decimals: TOKEN_DECIMALS,
        }
    }
}

/// Messages accepted by [`Synchronizer::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Request wallet access, then resync
    Connect,
    /// Re-read metadata, balance and owner flag
    Refresh,
    SubmitMint(String),
    SubmitBurn(String),
    SubmitTransfer { to: String, amount: String },
    DismissBanner,
    /// Stop the session
    Shutdown,
}

/// A validated write ready to be issued.
#[derive(Debug, Clone, Copy)]
enum Write {
    Mint(U256),
    Burn(U256),
    Transfer { to: Address, amount: U256 },
}

impl Write {
    const fn kind(&self) -> ActionKind {
        match self {
            Self::Mint(_) => ActionKind::Mint,
            Self::Burn(_) => ActionKind::Burn,
            Self::Transfer { .. } => ActionKind::Transfer,
        }
    }
}

pub struct Synchronizer<W, C> {
    wallet: Option<W>,
    contract: C,
    config: SessionConfig,
    state: ViewState,
    view: watch::Sender<ViewState>,
    events_subscribed: bool,
    metrics: Metrics,
}

impl<W, C> Synchronizer<W, C>
where
    W: Wallet,
    C: TokenContract,
{
    /// Create a session. `wallet` is `None` when no wallet is available.
    pub fn new(wallet: Option<W>, contract: C, config: SessionConfig) -> Self {
        let (view, _) = watch::channel(ViewState::default());

        Self {
            wallet,
            contract,
            config,
            state: ViewState::default(),
            view,
            events_subscribed: false,
            metrics: Metrics::new(),
        }
    }

    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    /// Receive a snapshot whenever the state changes.
    pub fn subscribe_view(&self) -> watch::Receiver<ViewState> {
        self.view.subscribe()
    }

    fn publish(&self) {
        self.view.send_if_modified(|view| {
            if *view == self.state {
                false
            } else {
                *view = self.state.clone();
                true
            }
        });
    }

    /// Request account access from the wallet.
    pub async fn connect_wallet(&mut self) -> Result<Address, SyncError> {
        let Some(wallet) = &self.wallet else {
            warn!("No wallet available");
            self.state.banner.show(WALLET_MISSING_MESSAGE);
            return Err(SyncError::WalletMissing);
        };

        let accounts = match wallet.request_accounts().await {
            Ok(accounts) => accounts,
            Err(e) => {
                warn!(error = %e, "Wallet refused account access");
                self.state.banner.show(e.to_string());
                return Err(e);
            }
        };

        let Some(&address) = accounts.first() else {
            let e = SyncError::Call("Wallet returned no accounts".to_string());
            self.state.banner.show(e.to_string());
            return Err(e);
        };

        self.state.wallet.connected = true;
        self.state.wallet.address = address;
        info!(account = %address, "Wallet connected");

        Ok(address)
    }

    /// Re-read name, symbol and total supply.
    ///
    /// Metadata is replaced only when all three reads succeed.
    pub async fn refresh_metadata(&mut self) -> Result<(), SyncError> {
        let reads = tokio::try_join!(
            self.contract.name(),
            self.contract.symbol(),
            self.contract.total_supply()
        );

        match reads {
            Ok((name, symbol, total_supply)) => {
                debug!(%name, %symbol, %total_supply, "Token metadata refreshed");
                self.state.metadata = TokenMetadata {
                    name,
                    symbol,
                    total_supply: format_amount(total_supply, self.config.decimals),
                };
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to refresh token metadata");
                self.metrics.record_read_failure("metadata");
                Err(e)
            }
        }
    }

    async fn refresh_total_supply(&mut self) -> Result<(), SyncError> {
        match self.contract.total_supply().await {
            Ok(total_supply) => {
                self.state.metadata.total_supply =
                    format_amount(total_supply, self.config.decimals);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to refresh total supply");
                self.metrics.record_read_failure("total_supply");
                Err(e)
            }
        }
    }

    /// Re-read the connected account's balance. Skipped while disconnected.
    pub async fn refresh_balance(&mut self) -> Result<(), SyncError> {
        if !self.state.wallet.connected {
            debug!("Wallet not connected, skipping balance refresh");
            return Ok(());
        }

        let caller = self.state.wallet.address;
        match self.contract.balance(caller).await {
            Ok(balance) => {
                debug!(account = %caller, %balance, "Balance refreshed");
                self.state.balance = format_amount(balance, self.config.decimals);
                Ok(())
            }
            Err(e) => {
                warn!(account = %caller, error = %e, "Failed to refresh balance");
                self.metrics.record_read_failure("balance");
                Err(e)
            }
        }
    }

    /// Re-read whether the connected account owns the token.
    pub async fn refresh_owner_flag(&mut self) -> Result<(), SyncError> {
        if !self.state.wallet.connected {
            debug!("Wallet not connected, skipping owner check");
            return Ok(());
        }

        let caller = self.state.wallet.address;
        match self.contract.is_owner(caller).await {
            Ok(is_owner) => {
                self.state.is_owner = is_owner;
                Ok(())
            }
            Err(e) => {
                warn!(account = %caller, error = %e, "Failed to check ownership");
                self.metrics.record_read_failure("owner");
                Err(e)
            }
        }
    }

    /// Full reconciliation pass. Failures are logged by each step.
    pub async fn resync(&mut self) {
        if !self.state.wallet.connected {
            let _ = self.connect_wallet().await;
        }

        let _ = self.refresh_metadata().await;
        let _ = self.refresh_balance().await;
        let _ = self.refresh_owner_flag().await;
    }

    /// Submit a mint of `amount` tokens.
    ///
    /// Returns `Ok(None)` when nothing was issued (empty input, or a mint is
    /// already pending).
    pub async fn submit_mint(&mut self, amount: &str) -> Result<Option<TxHash>, SyncError> {
        amount.clone_into(&mut self.state.mint_draft);
        if amount.trim().is_empty() || self.is_busy(ActionKind::Mint) {
            return Ok(None);
        }

        match to_base_units(amount, self.config.decimals) {
            Ok(value) => self.issue(Write::Mint(value)).await,
            Err(e) => Err(self.reject(ActionKind::Mint, e)),
        }
    }

    /// Submit a burn of `amount` tokens.
    ///
    /// Issued even when the caller is not the owner; the contract decides.
    pub async fn submit_burn(&mut self, amount: &str) -> Result<Option<TxHash>, SyncError> {
        amount.clone_into(&mut self.state.burn_draft);
        if amount.trim().is_empty() || self.is_busy(ActionKind::Burn) {
            return Ok(None);
        }

        match to_base_units(amount, self.config.decimals) {
            Ok(value) => self.issue(Write::Burn(value)).await,
            Err(e) => Err(self.reject(ActionKind::Burn, e)),
        }
    }

    /// Submit a transfer of `amount` tokens to `to`.
    pub async fn submit_transfer(
        &mut self,
        to: &str,
        amount: &str,
    ) -> Result<Option<TxHash>, SyncError> {
        self.state.transfer_draft = TransferDraft {
            to: to.to_string(),
            amount: amount.to_string(),
        };
        if !self.state.transfer_draft.is_complete() || self.is_busy(ActionKind::Transfer) {
            return Ok(None);
        }

        let recipient = match to.trim().parse::<Address>() {
            Ok(recipient) => recipient,
            Err(_) => {
                let e = SyncError::InvalidRecipient(to.to_string());
                return Err(self.reject(ActionKind::Transfer, e));
            }
        };

        match to_base_units(amount, self.config.decimals) {
            Ok(value) => {
                self.issue(Write::Transfer {
                    to: recipient,
                    amount: value,
                })
                .await
            }
            Err(e) => Err(self.reject(ActionKind::Transfer, e)),
        }
    }

    fn is_busy(&self, kind: ActionKind) -> bool {
        let busy = self.state.pending.is_pending(kind);
        if busy {
            debug!(%kind, "Action already pending, ignoring submission");
        }
        busy
    }

    /// Surface a submission failure on the banner.
    fn reject(&mut self, kind: ActionKind, error: SyncError) -> SyncError {
        self.state.pending.clear(kind);
        self.state.banner.show(error.to_string());
        warn!(%kind, error = %error, "Submission failed");
        error
    }

    async fn issue(&mut self, write: Write) -> Result<Option<TxHash>, SyncError> {
        let kind = write.kind();
        if self.wallet.is_none() {
            return Err(self.reject(kind, SyncError::WalletMissing));
        }
        let caller = self.state.wallet.address;

        self.state.pending.set(
            kind,
            PendingAction {
                tx_hash: None,
                submitted_at: Instant::now(),
            },
        );

        let result = match write {
            Write::Mint(amount) => self.contract.mint(caller, amount).await,
            Write::Burn(amount) => self.contract.burn(caller, amount).await,
            Write::Transfer { to, amount } => self.contract.transfer_funds(caller, to, amount).await,
        };

        match result {
            Ok(tx_hash) => {
                info!(%kind, tx_hash = %tx_hash, "Write accepted, awaiting confirmation");
                self.state.pending.accept(kind, tx_hash);
                self.metrics.record_submitted(kind);
                Ok(Some(tx_hash))
            }
            Err(e) => {
                self.metrics.record_rejected(kind);
                Err(self.reject(kind, e))
            }
        }
    }

    /// Start listening for contract events.
    ///
    /// Returns `None` if this session already subscribed, so each event is
    /// delivered once.
    pub async fn subscribe_to_contract_events(&mut self) -> Result<Option<TokenEvents>, SyncError> {
        if self.events_subscribed {
            debug!("Already subscribed to token events");
            return Ok(None);
        }

        let events = self.contract.events().await?;
        self.events_subscribed = true;
        Ok(Some(events))
    }

    /// Listen for external account switches. `None` without a wallet.
    pub fn subscribe_to_account_change(&self) -> Option<watch::Receiver<Vec<Address>>> {
        self.wallet.as_ref().map(Wallet::account_changes)
    }

    /// Apply a completion notification.
    ///
    /// An event completes our pending action of its kind when the
    /// transaction hashes agree (or either side has none): the pending
    /// action and draft are cleared. Events for other transactions leave a
    /// pending action alone. Either way the values the write changed are
    /// re-read.
    pub async fn apply_event(&mut self, event: TokenEvent) {
        let kind = match &event {
            TokenEvent::Minted { .. } => ActionKind::Mint,
            TokenEvent::Burned { .. } => ActionKind::Burn,
            TokenEvent::Transferred { .. } => ActionKind::Transfer,
        };

        let pending_hash = self.state.pending.get(kind).map(|action| action.tx_hash);
        match pending_hash {
            Some(ours) if hashes_match(ours, event.tx_hash()) => {
                self.state.pending.clear(kind);
                info!(
                    %kind,
                    tx_hash = ?event.tx_hash(),
                    message = event.message(),
                    "Pending action confirmed"
                );
                self.metrics.record_confirmed(kind);
                self.state.banner.show(event.message());
                self.state.clear_draft(kind);
            }
            Some(ours) => {
                debug!(
                    %kind,
                    pending = ?ours,
                    tx_hash = ?event.tx_hash(),
                    "Event for another transaction, pending action kept"
                );
            }
            None => {
                info!(
                    %kind,
                    tx_hash = ?event.tx_hash(),
                    message = event.message(),
                    "Token event received"
                );
                self.state.banner.show(event.message());
            }
        }

        let _ = self.refresh_balance().await;
        let _ = self.refresh_total_supply().await;
    }

    /// Apply an external account switch.
    ///
    /// Only the address changes; connection state is left as is.
    pub async fn apply_accounts_changed(&mut self, accounts: Vec<Address>) {
        let address = accounts.first().copied().unwrap_or(Address::ZERO);
        if address == self.state.wallet.address {
            return;
        }

        info!(account = %address, "Wallet account changed");
        self.state.wallet.address = address;

        let _ = self.refresh_balance().await;
        let _ = self.refresh_owner_flag().await;
    }

    /// Clear pending actions older than the configured timeout.
    ///
    /// Returns the kinds that expired.
    pub fn expire_pending(&mut self, now: Instant) -> Vec<ActionKind> {
        let timeout = self.config.pending_timeout;
        let expired: Vec<ActionKind> = self
            .state
            .pending
            .kinds()
            .filter(|kind| {
                self.state
                    .pending
                    .get(*kind)
                    .is_some_and(|action| now.saturating_duration_since(action.submitted_at) >= timeout)
            })
            .collect();

        for &kind in &expired {
            let action = self.state.pending.clear(kind);
            let error = SyncError::Stuck {
                kind,
                timeout_secs: timeout.as_secs(),
            };
            warn!(
                %kind,
                tx_hash = ?action.and_then(|a| a.tx_hash),
                "Pending action expired without confirmation"
            );
            self.metrics.record_stuck(kind);
            self.state.banner.show(error.to_string());
        }

        expired
    }

    pub fn dismiss_banner(&mut self) {
        self.state.banner.dismiss();
    }

    /// Handle one command. Returns `false` when the session should stop.
    pub async fn dispatch(&mut self, command: Command) -> bool {
        let result = match command {
            Command::Connect => match self.connect_wallet().await {
                Ok(_) => {
                    self.resync().await;
                    Ok(None)
                }
                Err(e) => Err(e),
            },
            Command::Refresh => {
                self.resync().await;
                Ok(None)
            }
            Command::SubmitMint(amount) => self.submit_mint(&amount).await,
            Command::SubmitBurn(amount) => self.submit_burn(&amount).await,
            Command::SubmitTransfer { to, amount } => self.submit_transfer(&to, &amount).await,
            Command::DismissBanner => {
                self.dismiss_banner();
                Ok(None)
            }
            Command::Shutdown => return false,
        };

        if let Err(e) = result {
            debug!(error = %e, "Command failed");
        }
        true
    }

    /// Run the session until the command channel closes or
    /// [`Command::Shutdown`] arrives.
    pub async fn run(mut self, mut commands: mpsc::Receiver<Command>) {
        info!("Starting token session");

        self.resync().await;

        let mut events: TokenEvents = match self.subscribe_to_contract_events().await {
            Ok(Some(events)) => events,
            Ok(None) => stream::pending().boxed(),
            Err(e) => {
                warn!(error = %e, "Failed to subscribe to token events");
                stream::pending().boxed()
            }
        };
        let mut accounts = self.subscribe_to_account_change();

        let mut sweep = time::interval(self.config.sweep_interval);
        sweep.set_missed_tick_behavior(MissedTickBehavior::Delay);

        self.publish();

        loop {
            tokio::select! {
                command = commands.recv() => {
                    let Some(command) = command else { break };
                    if !self.dispatch(command).await {
                        break;
                    }
                }
                Some(event) = events.next() => self.apply_event(event).await,
                Some(changed) = next_accounts(&mut accounts) => {
                    self.apply_accounts_changed(changed).await;
                }
                _ = sweep.tick() => {
                    self.expire_pending(Instant::now());
                }
            }

            self.publish();
        }

        info!("Token session stopped");
    }
}

fn hashes_match(pending: Option<TxHash>, event: Option<TxHash>) -> bool {
    match (pending, event) {
        (Some(pending), Some(event)) => pending == event,
        _ => true,
    }
}

/// Wait for the next account change. Never resolves once the wallet side
/// is gone.
async fn next_accounts(
    receiver: &mut Option<watch::Receiver<Vec<Address>>>,
) -> Option<Vec<Address>> {
    if let Some(rx) = receiver.as_mut() {
        if rx.changed().await.is_ok() {
            return Some(rx.borrow_and_update().clone());
        }
        debug!("Wallet account channel closed");
        *receiver = None;
    }

    std::future::pending().await
}
