//! Trade: a completed buy/sell round trip.

use serde::{Deserialize, Serialize};

use super::TimestampMs;

/// A closed long trade.
///
/// `entry_value` and `exit_value` are account values, not prices: the whole
/// account is converted into the asset on entry and back on exit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub buy_time: TimestampMs,
    pub sell_time: TimestampMs,
    pub entry_value: f64,
    pub exit_value: f64,
    pub gain: f64,
    pub perc_gain: f64,
}

impl Trade {
    /// Holding period in milliseconds.
    pub fn holding_time(&self) -> TimestampMs {
        self.sell_time - self.buy_time
    }

    /// Break-even trades count as wins.
    pub fn is_win(&self) -> bool {
        self.gain >= 0.0
    }
}
