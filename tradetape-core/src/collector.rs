//! Trade collector — walks accounts and strategies and buckets the trades
//! that fall inside the target window, per strategy.
//!
//! Failure isolation:
//! - the account list itself failing ends collection with no groups
//! - one account failing skips that account
//! - one strategy failing skips that strategy
//!
//! Only trades inside the window are validated; a bad record outside it
//! never costs a strategy its export.
//!
//! Every failure is logged and recorded in [`Collection::failures`]; nothing
//! propagates to the caller.

use log::{debug, error};
use serde::{Deserialize, Serialize};

use crate::domain::Trade;
use crate::naming::normalize_strategy_name;
use crate::provider::{AccountInfo, ProviderError, StrategyInfo, TradeProvider};
use crate::window::DateWindow;
use crate::LOG_TARGET;

/// Qualifying trades of one strategy instance, in discovery order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyTradeGroup {
    /// Normalized strategy name (instance suffix stripped).
    pub strategy_name: String,
    pub trades: Vec<Trade>,
}

impl StrategyTradeGroup {
    pub fn new(strategy_name: impl Into<String>) -> Self {
        Self {
            strategy_name: strategy_name.into(),
            trades: Vec::new(),
        }
    }

    pub fn net_profit(&self) -> f64 {
        self.trades.iter().map(|t| t.profit).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }
}

/// A provider failure caught during collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectFailure {
    /// `None` when the account list itself could not be read.
    pub account: Option<String>,
    pub strategy: Option<String>,
    pub message: String,
}

/// Output of one collection pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Non-empty groups, in account → strategy discovery order.
    pub groups: Vec<StrategyTradeGroup>,
    /// Sum of `profit` over every qualifying trade.
    pub total_pnl: f64,
    pub failures: Vec<CollectFailure>,
}

impl Collection {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn trade_count(&self) -> usize {
        self.groups.iter().map(|g| g.trades.len()).sum()
    }

    /// Fold groups that share a normalized name into the first one seen.
    ///
    /// Trades keep discovery order: all trades of the first instance, then
    /// those of the next, and so on.
    pub fn merge_instances(mut self) -> Self {
        let mut merged: Vec<StrategyTradeGroup> = Vec::with_capacity(self.groups.len());
        for group in self.groups.drain(..) {
            match merged
                .iter_mut()
                .find(|g| g.strategy_name == group.strategy_name)
            {
                Some(existing) => existing.trades.extend(group.trades),
                None => merged.push(group),
            }
        }
        self.groups = merged;
        self
    }
}

/// Collect qualifying trades from every account except `excluded_account`.
pub fn collect(
    provider: &dyn TradeProvider,
    excluded_account: &str,
    window: &DateWindow,
) -> Collection {
    let mut collection = Collection::default();

    let accounts = match provider.accounts() {
        Ok(accounts) => accounts,
        Err(err) => {
            error!(target: LOG_TARGET, "ERROR: {err}");
            collection.failures.push(CollectFailure {
                account: None,
                strategy: None,
                message: err.to_string(),
            });
            return collection;
        }
    };

    for account in accounts.iter().filter(|a| a.name != excluded_account) {
        if let Err(err) = collect_account(provider, account, window, &mut collection) {
            error!(target: LOG_TARGET, "ERROR: {err}");
            collection.failures.push(CollectFailure {
                account: Some(account.name.clone()),
                strategy: None,
                message: err.to_string(),
            });
        }
    }

    collection
}

fn collect_account(
    provider: &dyn TradeProvider,
    account: &AccountInfo,
    window: &DateWindow,
    collection: &mut Collection,
) -> Result<(), ProviderError> {
    let strategies = provider.strategies(account)?;

    for strategy in strategies.iter().filter(|s| !s.is_terminal) {
        match collect_strategy(provider, account, strategy, window) {
            Ok((group, pnl)) => {
                collection.total_pnl += pnl;
                if !group.is_empty() {
                    collection.groups.push(group);
                }
            }
            Err(err) => {
                error!(target: LOG_TARGET, "ERROR: {err}");
                collection.failures.push(CollectFailure {
                    account: Some(account.name.clone()),
                    strategy: Some(strategy.display_name.clone()),
                    message: err.to_string(),
                });
            }
        }
    }

    Ok(())
}

fn collect_strategy(
    provider: &dyn TradeProvider,
    account: &AccountInfo,
    strategy: &StrategyInfo,
    window: &DateWindow,
) -> Result<(StrategyTradeGroup, f64), ProviderError> {
    let history = provider.trade_history(account, strategy)?;
    let mut group = StrategyTradeGroup::new(normalize_strategy_name(&strategy.display_name));
    let mut pnl = 0.0;

    for trade in history.into_iter().filter(|t| window.contains(t.entry_time)) {
        trade
            .validate()
            .map_err(|source| ProviderError::MalformedTrade {
                account: account.name.clone(),
                strategy: strategy.display_name.clone(),
                trade_number: trade.trade_number,
                source,
            })?;
        debug!(
            target: LOG_TARGET,
            "{},{},{},{},{},{}",
            strategy.display_name,
            trade.instrument.name,
            trade.quantity,
            trade.entry_name,
            trade.entry_time,
            trade.entry_price
        );
        pnl += trade.profit;
        group.trades.push(trade);
    }

    Ok((group, pnl))
}
