//! Backtest engine: replays signals against candles on a single-position account.
//!
//! 1. Validate: every signal time must exist among the candles, and no two
//!    signals may share a time.
//! 2. Stable-sort signals by time and join each to its candle's close.
//! 3. Replay the joined rows through an [`Account`]: BUY while flat opens,
//!    SELL while long closes, anything else is ignored.
//! 4. Aggregate the closed trades into a [`BacktestResult`].

pub mod result;

pub use result::BacktestResult;

use std::collections::{HashMap, HashSet};

use thiserror::Error;
use tracing::debug;

use crate::domain::{Account, Candle, Signal, SignalDirection, TimestampMs, Trade};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BacktestError {
    #[error("signal timestamp {time} is not present in the candle data")]
    InvalidSignalTimestamp { time: TimestampMs },

    #[error("more than one signal at timestamp {time}")]
    DuplicateSignalTimestamp { time: TimestampMs },

    #[error("more than one candle at timestamp {time}")]
    DuplicateCandleTimestamp { time: TimestampMs },
}

/// Run a backtest. Signals may arrive in any order.
///
/// Fails before replaying anything if two candles share a timestamp or a
/// signal cannot be matched to exactly one candle.
pub fn run_backtest(
    candles: &[Candle],
    signals: &[Signal],
) -> Result<BacktestResult, BacktestError> {
    let mut closes: HashMap<TimestampMs, f64> = HashMap::with_capacity(candles.len());
    for candle in candles {
        if closes.insert(candle.time, candle.close).is_some() {
            return Err(BacktestError::DuplicateCandleTimestamp { time: candle.time });
        }
    }

    let mut seen = HashSet::with_capacity(signals.len());
    for signal in signals {
        if !closes.contains_key(&signal.time) {
            return Err(BacktestError::InvalidSignalTimestamp { time: signal.time });
        }
        if !seen.insert(signal.time) {
            return Err(BacktestError::DuplicateSignalTimestamp { time: signal.time });
        }
    }

    let mut ordered = signals.to_vec();
    ordered.sort_by_key(|s| s.time);

    let mut account = Account::default();
    let mut trades: Vec<Trade> = Vec::new();

    for signal in &ordered {
        let close = closes[&signal.time];
        match signal.direction {
            SignalDirection::Buy => {
                if !account.open(signal.time, close) {
                    debug!(time = signal.time, "buy ignored while long");
                }
            }
            SignalDirection::Sell => match account.close(signal.time, close) {
                Some(trade) => trades.push(trade),
                None => debug!(time = signal.time, "sell ignored while flat"),
            },
        }
    }

    Ok(BacktestResult::from_trades(&trades, account.value()))
}
