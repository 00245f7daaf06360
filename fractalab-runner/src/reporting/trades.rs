//! Trade tape export (CSV).

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use fractalab_core::domain::TimestampMs;
use fractalab_core::engine::BacktestResult;

use super::summary::format_timestamp;

/// One closed trade, as written to `trades.csv`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRow {
    pub buy_time: TimestampMs,
    pub sell_time: TimestampMs,
    pub buy_utc: String,
    pub sell_utc: String,
    pub gain: f64,
    pub perc_gain: f64,
    pub holding_ms: TimestampMs,
}

impl TradeRow {
    pub fn from_result(result: &BacktestResult) -> Vec<Self> {
        result
            .buy_times
            .iter()
            .zip(&result.sell_times)
            .zip(result.trade_gain_losses.iter().zip(&result.trade_perc_gain_losses))
            .map(|((&buy_time, &sell_time), (&gain, &perc_gain))| Self {
                buy_time,
                sell_time,
                buy_utc: format_timestamp(buy_time),
                sell_utc: format_timestamp(sell_time),
                gain,
                perc_gain,
                holding_ms: sell_time - buy_time,
            })
            .collect()
    }
}

pub fn write_trades_csv(path: &Path, result: &BacktestResult) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create trades CSV {}", path.display()))?;
    let rows = TradeRow::from_result(result);
    if rows.is_empty() {
        // serialize() only writes the header alongside the first row.
        writer.write_record([
            "buy_time",
            "sell_time",
            "buy_utc",
            "sell_utc",
            "gain",
            "perc_gain",
            "holding_ms",
        ])?;
    }
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush().context("Failed to flush trades CSV")?;
    Ok(())
}
