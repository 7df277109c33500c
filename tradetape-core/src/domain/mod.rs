//! Domain types for TradeTape

pub mod account;
pub mod instrument;
pub mod trade;

pub use account::{Account, Strategy};
pub use instrument::Instrument;
pub use trade::{MarketPosition, Trade, TradeError};
