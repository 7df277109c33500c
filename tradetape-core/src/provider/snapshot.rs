//! JSON snapshot of the host's accounts, used as a file-backed provider.
//!
//! ```json
//! { "accounts": [ { "name": "Live1", "strategies": [
//!     { "display_name": "Alpha (2)", "is_terminal": false, "trades": [ ... ] } ] } ] }
//! ```
//!
//! Accounts and strategies are addressed by position, so duplicate names
//! never alias each other.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{AccountInfo, ProviderError, StrategyInfo, TradeProvider};
use crate::domain::{Account, Trade};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub accounts: Vec<Account>,
}

impl Snapshot {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self { accounts }
    }

    pub fn from_json(content: &str) -> Result<Self, ProviderError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ProviderError> {
        let content = std::fs::read_to_string(path).map_err(|source| ProviderError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    fn account(&self, account: &AccountInfo) -> Result<&Account, ProviderError> {
        self.accounts
            .get(account.index)
            .filter(|a| a.name == account.name)
            .ok_or_else(|| ProviderError::AccountUnavailable {
                account: account.name.clone(),
                reason: format!("no account '{}' at position {}", account.name, account.index),
            })
    }
}

impl TradeProvider for Snapshot {
    fn name(&self) -> &str {
        "snapshot"
    }

    fn accounts(&self) -> Result<Vec<AccountInfo>, ProviderError> {
        Ok(self
            .accounts
            .iter()
            .enumerate()
            .map(|(index, a)| AccountInfo {
                index,
                name: a.name.clone(),
            })
            .collect())
    }

    fn strategies(&self, account: &AccountInfo) -> Result<Vec<StrategyInfo>, ProviderError> {
        let account = self.account(account)?;
        Ok(account
            .strategies
            .iter()
            .enumerate()
            .map(|(index, s)| StrategyInfo {
                index,
                display_name: s.display_name.clone(),
                is_terminal: s.is_terminal,
            })
            .collect())
    }

    fn trade_history(
        &self,
        account: &AccountInfo,
        strategy: &StrategyInfo,
    ) -> Result<Vec<Trade>, ProviderError> {
        let acct = self.account(account)?;
        let entry = acct.strategies.get(strategy.index).ok_or_else(|| {
            ProviderError::StrategyUnavailable {
                account: account.name.clone(),
                strategy: strategy.display_name.clone(),
                reason: format!("no strategy at position {}", strategy.index),
            }
        })?;
        Ok(entry.trades.clone())
    }
}
