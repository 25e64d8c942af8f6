//! Conversion between human decimal strings and base units.
//!
//! Amounts are fixed point: with 18 decimals "10" is `10 * 10^18` base
//! units, and `10 * 10^18` base units display as "10.0".

use crate::SyncError;
use alloy_primitives::{
    utils::{format_units, parse_units},
    U256,
};

/// Fixed-point scale of the token unless configured otherwise.
pub const TOKEN_DECIMALS: u8 = 18;

/// Parse a human decimal amount (e.g. "1.5") into base units.
///
/// Fractions finer than `decimals` digits are rejected, never truncated.
pub fn to_base_units(amount: &str, decimals: u8) -> Result<U256, SyncError> {
    let trimmed = amount.trim();
    let invalid = |reason: String| SyncError::InvalidAmount {
        amount: amount.to_string(),
        reason,
    };

    if trimmed.starts_with('-') {
        return Err(invalid("amount must not be negative".to_string()));
    }

    if let Some((_, fraction)) = trimmed.split_once('.') {
        if fraction.len() > usize::from(decimals) {
            return Err(invalid(format!(
                "fractional component exceeds {decimals} decimals"
            )));
        }
    }

    let parsed = parse_units(trimmed, decimals).map_err(|e| invalid(e.to_string()))?;
    Ok(parsed.get_absolute())
}

/// Format base units for display, trimming trailing zeros but keeping at
/// least one fractional digit.
pub fn format_amount(value: U256, decimals: u8) -> String {
    let formatted = format_units(value, decimals).unwrap_or_else(|_| value.to_string());

    match formatted.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                format!("{whole}.0")
            } else {
                format!("{whole}.{fraction}")
            }
        }
        None => format!("{formatted}.0"),
    }
}
