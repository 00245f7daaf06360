//! Latest-row market summary built from the supplementary statistics.

use serde::{Deserialize, Serialize};

use super::{DailyVolume, Indicator, PctChange, RollingStd};
use crate::domain::{Candle, TimestampMs};

/// Rolling window used for the volatility figure.
pub const STD_WINDOW: usize = 60;

/// Summary of the most recent candle. Undefined figures are NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub time: TimestampMs,
    pub close: f64,
    pub change_1h: f64,
    pub change_24h: f64,
    pub change_7d: f64,
    pub volume_24h: f64,
    pub std_1h: f64,
}

impl MarketSnapshot {
    /// `None` for an empty series.
    pub fn latest(candles: &[Candle]) -> Option<Self> {
        let last = candles.last()?;
        Some(Self {
            time: last.time,
            close: last.close,
            change_1h: last_value(&PctChange::hour(), candles),
            change_24h: last_value(&PctChange::day(), candles),
            change_7d: last_value(&PctChange::week(), candles),
            volume_24h: last_value(&DailyVolume, candles),
            std_1h: last_value(&RollingStd::new(STD_WINDOW), candles),
        })
    }
}

fn last_value(indicator: &dyn Indicator, candles: &[Candle]) -> f64 {
    indicator
        .compute(candles)
        .last()
        .copied()
        .unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_candles, DEFAULT_EPSILON};

    #[test]
    fn empty_series_has_no_snapshot() {
        assert!(MarketSnapshot::latest(&[]).is_none());
    }

    #[test]
    fn snapshot_uses_last_row() {
        let closes: Vec<f64> = (0..61).map(|i| 100.0 + i as f64).collect();
        let snap = MarketSnapshot::latest(&make_candles(&closes)).unwrap();
        assert_eq!(snap.time, 60 * 60_000);
        assert_approx(snap.close, 160.0, DEFAULT_EPSILON);
        assert_approx(snap.change_1h, 0.6, DEFAULT_EPSILON);
        assert!(snap.change_24h.is_nan());
        assert!(snap.change_7d.is_nan());
        // make_candles starts at epoch 0, a midnight.
        assert_approx(snap.volume_24h, 600.0, DEFAULT_EPSILON);
        assert!(snap.std_1h > 0.0);
    }
}
