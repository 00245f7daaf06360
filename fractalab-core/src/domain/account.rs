//! Single-asset, single-position account.

use serde::{Deserialize, Serialize};

use super::{TimestampMs, Trade};

/// Unit baseline every backtest starts from.
pub const STARTING_VALUE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionState {
    Flat,
    Long,
}

/// All-in, all-out long-only account.
///
/// While `Long`, `units` holds the whole account in the asset and `value`
/// keeps the value it had at entry.
#[derive(Debug, Clone)]
pub struct Account {
    position: PositionState,
    value: f64,
    units: f64,
    entry_value: f64,
    entry_time: TimestampMs,
}

impl Default for Account {
    fn default() -> Self {
        Self::new(STARTING_VALUE)
    }
}

impl Account {
    pub fn new(value: f64) -> Self {
        Self {
            position: PositionState::Flat,
            value,
            units: 0.0,
            entry_value: value,
            entry_time: 0,
        }
    }

    pub fn position(&self) -> PositionState {
        self.position
    }

    /// Account value; while long this is the value at entry.
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn units(&self) -> f64 {
        self.units
    }

    /// Convert the whole account into asset units at `close`.
    ///
    /// Returns false (and changes nothing) when already long.
    pub fn open(&mut self, time: TimestampMs, close: f64) -> bool {
        if self.position == PositionState::Long {
            return false;
        }
        self.entry_value = self.value;
        self.entry_time = time;
        self.units = self.value / close;
        self.position = PositionState::Long;
        true
    }

    /// Liquidate all units at `close`, returning the closed trade.
    ///
    /// Returns `None` (and changes nothing) when flat.
    pub fn close(&mut self, time: TimestampMs, close: f64) -> Option<Trade> {
        if self.position == PositionState::Flat {
            return None;
        }
        self.value = self.units * close;
        self.units = 0.0;
        self.position = PositionState::Flat;

        let gain = self.value - self.entry_value;
        Some(Trade {
            buy_time: self.entry_time,
            sell_time: time,
            entry_value: self.entry_value,
            exit_value: self.value,
            gain,
            perc_gain: gain / self.entry_value,
        })
    }
}
