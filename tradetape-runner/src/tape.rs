//! Trade tape rendering — one strategy group to CSV bytes.
//!
//! Columns: Trade number, Instrument, Account, Strategy, Market pos., Qty,
//! Entry price, Exit price, Entry time, Exit time, Entry name, Exit name,
//! Profit, Cum. net profit, Commission, MAE, MFE, ETD, Bars
//!
//! Every row, the header included, ends with a trailing comma. `Cum. net
//! profit` is always `0.00` and `Bars` is always `0`; neither is computed.

use chrono::{NaiveDate, NaiveDateTime};
use tradetape_core::domain::Trade;
use tradetape_core::StrategyTradeGroup;

use crate::config::Quoting;

pub const COLUMNS: [&str; 19] = [
    "Trade number",
    "Instrument",
    "Account",
    "Strategy",
    "Market pos.",
    "Qty",
    "Entry price",
    "Exit price",
    "Entry time",
    "Exit time",
    "Entry name",
    "Exit name",
    "Profit",
    "Cum. net profit",
    "Commission",
    "MAE",
    "MFE",
    "ETD",
    "Bars",
];

const CUM_NET_PROFIT: &str = "0.00";
const BARS: &str = "0";

/// `{YYYYMMDD}-{strategy}.csv`
///
/// The strategy name is used verbatim. A name containing a path separator
/// or `..` yields a path outside the output directory; see
/// [`is_plain_file_stem`].
pub fn file_name(run_date: NaiveDate, strategy_name: &str) -> String {
    format!("{}-{}.csv", run_date.format("%Y%m%d"), strategy_name)
}

/// True when `strategy_name` is non-empty and names a single path component.
pub fn is_plain_file_stem(strategy_name: &str) -> bool {
    !strategy_name.trim().is_empty()
        && !strategy_name.contains(['/', '\\'])
        && !strategy_name.contains("..")
}

/// `MM/dd/yyyy h:m:s AM|PM`, 12-hour clock, no padding on time parts.
pub fn format_time(ts: NaiveDateTime) -> String {
    ts.format("%m/%d/%Y %-I:%-M:%-S %p").to_string()
}

/// Shortest representation that round-trips: `4500`, `4500.25`, `-12.5`.
pub fn format_decimal(value: f64) -> String {
    format!("{value}")
}

/// Efficiency rounded half-to-even to 2 places.
pub fn format_efficiency(value: f64) -> String {
    format_decimal((value * 100.0).round_ties_even() / 100.0)
}

fn row(trade: &Trade, strategy_name: &str) -> [String; 19] {
    [
        trade.trade_number.to_string(),
        trade.instrument.full_name.clone(),
        trade.account.clone(),
        strategy_name.to_string(),
        trade.market_position.as_str().to_string(),
        trade.quantity.to_string(),
        format_decimal(trade.entry_price),
        format_decimal(trade.exit_price),
        format_time(trade.entry_time),
        format_time(trade.exit_time),
        trade.entry_name.clone(),
        trade.exit_name.clone(),
        format_decimal(trade.profit),
        CUM_NET_PROFIT.to_string(),
        format_decimal(trade.commission),
        format_decimal(trade.mae),
        format_decimal(trade.mfe),
        format_efficiency(trade.total_efficiency),
        BARS.to_string(),
    ]
}

/// Render a group as CSV: header plus one row per trade, in group order.
pub fn render_group(group: &StrategyTradeGroup, quoting: Quoting) -> Result<Vec<u8>, csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(quoting.quote_style())
        .from_writer(vec![]);

    // Trailing empty field produces the trailing comma.
    wtr.write_record(COLUMNS.iter().copied().chain(std::iter::once("")))?;

    for trade in &group.trades {
        let fields = row(trade, &group.strategy_name);
        wtr.write_record(fields.iter().map(String::as_str).chain(std::iter::once("")))?;
    }

    wtr.into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}
