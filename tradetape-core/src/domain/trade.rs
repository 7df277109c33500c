//! Trade — a completed round trip as reported by the host platform.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::instrument::Instrument;

/// Direction of the position a trade opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketPosition {
    Long,
    Short,
}

impl MarketPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketPosition::Long => "Long",
            MarketPosition::Short => "Short",
        }
    }
}

/// Reasons a trade record from a provider is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TradeError {
    #[error("field '{field}' is not a finite number")]
    NonFinite { field: &'static str },
}

/// A complete round-trip trade record: entry → exit.
///
/// Trades are owned by the provider. The exporter reads them and never
/// writes them back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    // ── Identification ──
    pub trade_number: u32,
    pub instrument: Instrument,
    pub account: String,
    pub market_position: MarketPosition,
    pub quantity: u32,

    // ── Entry ──
    pub entry_price: f64,
    pub entry_time: NaiveDateTime,
    pub entry_name: String,

    // ── Exit ──
    pub exit_price: f64,
    pub exit_time: NaiveDateTime,
    pub exit_name: String,

    // ── PnL (account currency) ──
    pub profit: f64,
    pub commission: f64,

    // ── Excursion ──
    /// Maximum adverse excursion in currency.
    pub mae: f64,
    /// Maximum favorable excursion in currency.
    pub mfe: f64,

    /// Share of the favorable move captured by the exit (0.0–1.0).
    pub total_efficiency: f64,
}

impl Trade {
    /// Reject records whose numeric fields cannot be written as decimals.
    pub fn validate(&self) -> Result<(), TradeError> {
        let numeric = [
            ("entry_price", self.entry_price),
            ("exit_price", self.exit_price),
            ("profit", self.profit),
            ("commission", self.commission),
            ("mae", self.mae),
            ("mfe", self.mfe),
            ("total_efficiency", self.total_efficiency),
        ];
        if let Some((field, _)) = numeric.into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(TradeError::NonFinite { field });
        }
        Ok(())
    }
}
