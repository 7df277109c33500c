//! Trade provider trait and structured error types.
//!
//! The `TradeProvider` trait abstracts over the host platform's account and
//! trade-history store so the collector can run against a file snapshot, a
//! live adapter, or a mock in tests.

pub mod snapshot;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Trade, TradeError};

pub use snapshot::Snapshot;

/// Structured error types raised by a provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("accounts are unavailable: {0}")]
    AccountsUnavailable(String),

    #[error("account '{account}' is unavailable: {reason}")]
    AccountUnavailable { account: String, reason: String },

    #[error("strategy '{strategy}' on account '{account}' is unavailable: {reason}")]
    StrategyUnavailable {
        account: String,
        strategy: String,
        reason: String,
    },

    #[error("malformed trade #{trade_number} in '{strategy}' on account '{account}': {source}")]
    MalformedTrade {
        account: String,
        strategy: String,
        trade_number: u32,
        #[source]
        source: TradeError,
    },

    #[error("failed to read snapshot {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Lightweight handle for one account.
///
/// `index` is the position in the host's account list and identifies the
/// account even when two accounts share a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub index: usize,
    pub name: String,
}

/// Lightweight handle for one strategy instance on an account.
///
/// `index` is the position in the account's strategy list and identifies the
/// instance even when two strategies share a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyInfo {
    pub index: usize,
    pub display_name: String,
    pub is_terminal: bool,
}

/// Read-only access to the host's accounts, strategies, and trade histories.
pub trait TradeProvider {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// All accounts, in host order.
    fn accounts(&self) -> Result<Vec<AccountInfo>, ProviderError>;

    /// Strategies running on `account`, in host order.
    fn strategies(&self, account: &AccountInfo) -> Result<Vec<StrategyInfo>, ProviderError>;

    /// Full trade history of one strategy instance, in host order.
    fn trade_history(
        &self,
        account: &AccountInfo,
        strategy: &StrategyInfo,
    ) -> Result<Vec<Trade>, ProviderError>;
}
