//! Williams-fractal pullback strategy, long only.
//!
//! Two-state scan over the frame:
//!
//! - `Flat`: at row i the EMAs must be stacked bullish (fast > mid > slow) and
//!   the row must carry a bullish fractal that sits inside the fast/mid band
//!   (stop at the mid EMA) or, failing that, the mid/slow band (stop at the
//!   slow EMA). The fractal is only known two rows later, so the entry, its
//!   stop-loss and its take-profit are all taken from row i+2.
//! - `InTrade`: from row i+3 on, the first row whose high reaches the
//!   take-profit or whose low breaks the stop-loss closes the trade.
//!   Take-profit wins when both happen on the same row.
//!
//! An entry still open when the data runs out is dropped, so the output is a
//! sequence of complete buy/sell pairs.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::Signal;
use crate::indicators::{FrameRow, IndicatorFrame};

/// Rows after a fractal candle before the fractal is confirmed.
pub const CONFIRMATION_ROWS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FractalConfig {
    /// Take-profit distance as a multiple of the entry-to-stop distance.
    pub target_ratio: f64,
    /// Leading rows skipped while the slow EMA converges.
    pub warmup_rows: usize,
}

impl Default for FractalConfig {
    fn default() -> Self {
        Self {
            target_ratio: 1.5,
            warmup_rows: 100,
        }
    }
}

impl FractalConfig {
    /// Shortest frame the scan accepts. Saturates, so a huge warm-up simply
    /// rejects every frame.
    pub fn min_rows(&self) -> usize {
        self.warmup_rows.saturating_add(CONFIRMATION_ROWS)
    }
}

/// EMA band the triggering fractal sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryZone {
    FastMid,
    MidSlow,
}

impl EntryZone {
    /// Classify a row. `None` unless the EMAs are stacked bullish and the
    /// row's bullish fractal falls inside one of the two bands.
    pub fn classify(row: &FrameRow) -> Option<Self> {
        if !(row.ema_fast > row.ema_mid && row.ema_mid > row.ema_slow) {
            return None;
        }
        let bull = row.bull_fractal?;
        if bull <= row.ema_fast && bull > row.ema_mid {
            Some(Self::FastMid)
        } else if bull <= row.ema_mid && bull > row.ema_slow {
            Some(Self::MidSlow)
        } else {
            None
        }
    }

    /// EMA at `row` used as the stop-loss.
    pub fn boundary(self, row: &FrameRow) -> f64 {
        match self {
            Self::FastMid => row.ema_mid,
            Self::MidSlow => row.ema_slow,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitReason {
    TakeProfit,
    StopLoss,
}

/// Counters collected during a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    pub fast_mid_entries: usize,
    pub mid_slow_entries: usize,
    pub take_profit_exits: usize,
    pub stop_loss_exits: usize,
    pub discarded_trailing_entry: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanOutcome {
    pub signals: Vec<Signal>,
    pub stats: ScanStats,
}

/// Price levels of the open trade. Created fresh on every entry.
#[derive(Debug, Clone, Copy)]
struct Bracket {
    stop_loss: f64,
    take_profit: f64,
    /// First row on which exits are checked.
    resume_at: usize,
}

impl Bracket {
    fn exit(&self, row: &FrameRow) -> Option<ExitReason> {
        if row.high >= self.take_profit {
            Some(ExitReason::TakeProfit)
        } else if row.low < self.stop_loss {
            Some(ExitReason::StopLoss)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum ScanState {
    Flat,
    InTrade(Bracket),
}

#[derive(Debug, Clone, Default)]
pub struct FractalSignalGenerator {
    config: FractalConfig,
}

impl FractalSignalGenerator {
    pub fn new(config: FractalConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FractalConfig {
        &self.config
    }

    /// Signals only. `None` when the frame is shorter than `min_rows()`.
    pub fn generate(&self, frame: &IndicatorFrame) -> Option<Vec<Signal>> {
        self.scan(frame).map(|outcome| outcome.signals)
    }

    /// Signals plus scan counters. `None` when the frame is shorter than `min_rows()`.
    pub fn scan(&self, frame: &IndicatorFrame) -> Option<ScanOutcome> {
        let n = frame.len();
        if n < self.config.min_rows() {
            warn!(
                rows = n,
                required = self.config.min_rows(),
                "not enough rows for fractal scan"
            );
            return None;
        }

        let mut signals = Vec::new();
        let mut stats = ScanStats::default();
        let mut state = ScanState::Flat;

        for i in self.config.warmup_rows..n - CONFIRMATION_ROWS {
            match state {
                ScanState::InTrade(bracket) => {
                    if i < bracket.resume_at {
                        continue;
                    }
                    let row = frame.row(i);
                    if let Some(reason) = bracket.exit(&row) {
                        match reason {
                            ExitReason::TakeProfit => stats.take_profit_exits += 1,
                            ExitReason::StopLoss => stats.stop_loss_exits += 1,
                        }
                        debug!(time = row.time, ?reason, "exit");
                        signals.push(Signal::sell(row.time));
                        state = ScanState::Flat;
                    }
                }
                ScanState::Flat => {
                    let Some(zone) = EntryZone::classify(&frame.row(i)) else {
                        continue;
                    };
                    let confirmed_at = i + CONFIRMATION_ROWS;
                    let entry = frame.row(confirmed_at);
                    let stop_loss = zone.boundary(&entry);
                    let take_profit =
                        entry.close + (entry.close - stop_loss).abs() * self.config.target_ratio;

                    match zone {
                        EntryZone::FastMid => stats.fast_mid_entries += 1,
                        EntryZone::MidSlow => stats.mid_slow_entries += 1,
                    }
                    debug!(
                        time = entry.time,
                        ?zone,
                        stop_loss,
                        take_profit,
                        "entry"
                    );
                    signals.push(Signal::buy(entry.time));
                    state = ScanState::InTrade(Bracket {
                        stop_loss,
                        take_profit,
                        resume_at: confirmed_at + 1,
                    });
                }
            }
        }

        if signals.last().is_some_and(Signal::is_buy) {
            signals.pop();
            stats.discarded_trailing_entry = true;
        }

        Some(ScanOutcome { signals, stats })
    }
}
