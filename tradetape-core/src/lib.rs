//! TradeTape Core — domain types, trade providers, and the trade collector.
//!
//! This crate contains the data-shaping half of the end-of-day export:
//! - Domain types (trades, instruments, accounts, strategies)
//! - Date windows for selecting trades by entry date
//! - Strategy name normalization
//! - The `TradeProvider` trait and a JSON snapshot provider
//! - The collector that buckets qualifying trades per strategy

pub mod collector;
pub mod domain;
pub mod naming;
pub mod provider;
pub mod window;

pub use collector::{collect, CollectFailure, Collection, StrategyTradeGroup};
pub use naming::normalize_strategy_name;
pub use provider::{AccountInfo, ProviderError, Snapshot, StrategyInfo, TradeProvider};
pub use window::{DateWindow, WindowError};

/// Log target shared by every export log line.
pub const LOG_TARGET: &str = "trade_export";
