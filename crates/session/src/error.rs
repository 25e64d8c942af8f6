use crate::state::ActionKind;
use thiserror::Error;

/// Banner text shown when no wallet is configured.
pub const WALLET_MISSING_MESSAGE: &str =
    "No wallet found: pass --private-key or set PRIVATE_KEY to get started";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// No wallet capability is available
    #[error("{}", WALLET_MISSING_MESSAGE)]
    WalletMissing,

    /// A wallet or contract call was rejected; the message is kept verbatim
    #[error("{0}")]
    Call(String),

    /// Amount is not a non-negative decimal within the token's precision
    #[error("Invalid amount `{amount}`: {reason}")]
    InvalidAmount { amount: String, reason: String },

    /// Transfer recipient is not an address
    #[error("Invalid recipient address `{0}`")]
    InvalidRecipient(String),

    /// A write was accepted but its completion event never arrived
    #[error("{kind} transaction was not confirmed within {timeout_secs}s")]
    Stuck { kind: ActionKind, timeout_secs: u64 },
}

impl SyncError {
    /// Wrap any call failure, keeping its message.
    pub fn call(err: impl std::fmt::Display) -> Self {
        Self::Call(err.to_string())
    }
}
