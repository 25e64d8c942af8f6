//! Observable view state.
//!
//! A single owned record. The synchronizer is the only writer; consumers get
//! cloned snapshots.

use alloy_primitives::{Address, TxHash};
use std::fmt;
use tokio::time::Instant;

/// Warning shown next to the burn form when the caller is not the owner.
pub const NOT_OWNER_WARNING: &str = "Only owner can burn tokens!";

/// Write action kinds tracked independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Mint,
    Burn,
    Transfer,
}

impl ActionKind {
    pub const ALL: [Self; 3] = [Self::Mint, Self::Burn, Self::Transfer];

    /// Label of the submit button while the action is pending.
    pub const fn busy_label(self) -> &'static str {
        match self {
            Self::Mint => "Minting ..",
            Self::Burn => "Destroying ..",
            Self::Transfer => "Sending ..",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Mint => 0,
            Self::Burn => 1,
            Self::Transfer => 2,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mint => write!(f, "Mint"),
            Self::Burn => write!(f, "Burn"),
            Self::Transfer => write!(f, "Transfer"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletIdentity {
    pub connected: bool,
    pub address: Address,
}

/// Snapshot of the token's descriptive reads.
///
/// Empty strings mean "not loaded yet".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub total_supply: String,
}

/// A write accepted by the wallet and awaiting its completion event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAction {
    pub tx_hash: Option<TxHash>,
    pub submitted_at: Instant,
}

/// In-flight marker per action kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingActions {
    slots: [Option<PendingAction>; 3],
}

impl PendingActions {
    pub const fn get(&self, kind: ActionKind) -> Option<&PendingAction> {
        self.slots[kind.index()].as_ref()
    }

    pub const fn is_pending(&self, kind: ActionKind) -> bool {
        self.slots[kind.index()].is_some()
    }

    pub const fn set(&mut self, kind: ActionKind, action: PendingAction) {
        self.slots[kind.index()] = Some(action);
    }

    /// Record the hash of an accepted write, keeping the submission time.
    pub const fn accept(&mut self, kind: ActionKind, tx_hash: TxHash) {
        if let Some(action) = self.slots[kind.index()].as_mut() {
            action.tx_hash = Some(tx_hash);
        }
    }

    pub const fn clear(&mut self, kind: ActionKind) -> Option<PendingAction> {
        self.slots[kind.index()].take()
    }

    /// Kinds currently pending.
    pub fn kinds(&self) -> impl Iterator<Item = ActionKind> + '_ {
        ActionKind::ALL
            .into_iter()
            .filter(|kind| self.is_pending(*kind))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferDraft {
    pub to: String,
    pub amount: String,
}

impl TransferDraft {
    pub fn is_complete(&self) -> bool {
        !self.to.trim().is_empty() && !self.amount.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Banner {
    pub visible: bool,
    pub message: String,
}

impl Banner {
    pub fn show(&mut self, message: impl Into<String>) {
        self.visible = true;
        self.message = message.into();
    }

    /// Hide the banner; the last message is kept.
    pub const fn dismiss(&mut self) {
        self.visible = false;
    }
}

/// Everything the console renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub wallet: WalletIdentity,
    pub metadata: TokenMetadata,
    /// Balance of the connected address, empty until loaded
    pub balance: String,
    pub pending: PendingActions,
    pub mint_draft: String,
    pub burn_draft: String,
    pub transfer_draft: TransferDraft,
    pub banner: Banner,
    pub is_owner: bool,
}

impl ViewState {
    /// Warning for the burn form, if any. Burning stays possible; the
    /// contract does the real ownership check.
    pub const fn burn_warning(&self) -> Option<&'static str> {
        if self.is_owner {
            None
        } else {
            Some(NOT_OWNER_WARNING)
        }
    }

    /// Clear the form buffer belonging to `kind`.
    pub fn clear_draft(&mut self, kind: ActionKind) {
        match kind {
            ActionKind::Mint => self.mint_draft.clear(),
            ActionKind::Burn => self.burn_draft.clear(),
            ActionKind::Transfer => self.transfer_draft = TransferDraft::default(),
        }
    }
}
