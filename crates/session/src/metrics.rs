//! Session metrics.
//!
//! Recorded through the global `metrics` registry; they are no-ops until a
//! recorder (e.g. the Prometheus exporter) is installed.

use crate::state::ActionKind;
use metrics::{counter, describe_counter};

/// Aggregated metrics for a token session.
#[derive(Debug, Clone)]
pub struct Metrics {
    _private: (),
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics instance and register all metric descriptions.
    pub fn new() -> Self {
        Self::register_descriptions();
        Self { _private: () }
    }

    fn register_descriptions() {
        describe_counter!(
            "token_writes_submitted_total",
            "Writes accepted by the wallet, by action"
        );
        describe_counter!(
            "token_writes_rejected_total",
            "Writes rejected at submission, by action"
        );
        describe_counter!(
            "token_writes_confirmed_total",
            "Completion events received, by action"
        );
        describe_counter!(
            "token_writes_stuck_total",
            "Pending writes expired without a completion event, by action"
        );
        describe_counter!(
            "token_read_failures_total",
            "Failed contract reads, by read"
        );
    }

    pub fn record_submitted(&self, kind: ActionKind) {
        counter!("token_writes_submitted_total", "action" => kind.to_string()).increment(1);
    }

    pub fn record_rejected(&self, kind: ActionKind) {
        counter!("token_writes_rejected_total", "action" => kind.to_string()).increment(1);
    }

    pub fn record_confirmed(&self, kind: ActionKind) {
        counter!("token_writes_confirmed_total", "action" => kind.to_string()).increment(1);
    }

    pub fn record_stuck(&self, kind: ActionKind) {
        counter!("token_writes_stuck_total", "action" => kind.to_string()).increment(1);
    }

    pub fn record_read_failure(&self, read: &'static str) {
        counter!("token_read_failures_total", "read" => read).increment(1);
    }
}
