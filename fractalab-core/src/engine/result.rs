//! Aggregate statistics for a completed backtest.

use serde::{Deserialize, Serialize};

use crate::domain::{TimestampMs, Trade, STARTING_VALUE};

/// Summary of a backtest. Per-trade sequences hold one entry per closed
/// trade, in the order the trades closed.
///
/// Averages and the win rate are 0 when no trade closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    pub buy_times: Vec<TimestampMs>,
    pub sell_times: Vec<TimestampMs>,
    /// Close time of each trade.
    pub trade_times: Vec<TimestampMs>,
    pub trade_gain_losses: Vec<f64>,
    pub trade_perc_gain_losses: Vec<f64>,
    pub num_wins: usize,
    pub win_rate: f64,
    pub num_trades: usize,
    pub start_portfolio_value: f64,
    pub end_portfolio_value: f64,
    pub percentage_gain: f64,
    pub avg_perc_gain_per_trade: f64,
    pub avg_gain_loss_per_trade: f64,
    /// Mean holding time in milliseconds.
    pub avg_holding_time: f64,
}

impl BacktestResult {
    /// Aggregate closed trades. `end_value` is the account value after replay.
    pub fn from_trades(trades: &[Trade], end_value: f64) -> Self {
        let num_trades = trades.len();
        let num_wins = trades.iter().filter(|t| t.is_win()).count();
        let gains: Vec<f64> = trades.iter().map(|t| t.gain).collect();
        let perc_gains: Vec<f64> = trades.iter().map(|t| t.perc_gain).collect();
        let holding: Vec<f64> = trades.iter().map(|t| t.holding_time() as f64).collect();

        Self {
            buy_times: trades.iter().map(|t| t.buy_time).collect(),
            sell_times: trades.iter().map(|t| t.sell_time).collect(),
            trade_times: trades.iter().map(|t| t.sell_time).collect(),
            num_wins,
            win_rate: if num_trades > 0 {
                num_wins as f64 / num_trades as f64
            } else {
                0.0
            },
            num_trades,
            start_portfolio_value: STARTING_VALUE,
            end_portfolio_value: end_value,
            percentage_gain: (end_value - STARTING_VALUE) / STARTING_VALUE,
            avg_perc_gain_per_trade: mean(&perc_gains),
            avg_gain_loss_per_trade: mean(&gains),
            avg_holding_time: mean(&holding),
            trade_gain_losses: gains,
            trade_perc_gain_losses: perc_gains,
        }
    }

    /// Result of a run that produced no trades.
    pub fn empty() -> Self {
        Self::from_trades(&[], STARTING_VALUE)
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
