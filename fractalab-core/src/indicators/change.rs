//! Percentage change of close over a fixed number of rows.
//!
//! change[t] = (close[t] - close[t-rows]) / close[t-rows]
//! Lookback: rows.

use super::Indicator;
use crate::domain::Candle;

#[derive(Debug, Clone)]
pub struct PctChange {
    rows: usize,
    name: String,
}

impl PctChange {
    pub fn new(rows: usize) -> Self {
        assert!(rows >= 1, "PctChange rows must be >= 1");
        Self {
            rows,
            name: format!("pct_change_{rows}"),
        }
    }

    /// One hour of one-minute candles.
    pub fn hour() -> Self {
        Self::new(60)
    }

    /// One day of one-minute candles.
    pub fn day() -> Self {
        Self::new(60 * 24)
    }

    /// One week of one-minute candles.
    pub fn week() -> Self {
        Self::new(60 * 24 * 7)
    }
}

impl Indicator for PctChange {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.rows
    }

    fn compute(&self, candles: &[Candle]) -> Vec<f64> {
        let mut result = vec![f64::NAN; candles.len()];
        for i in self.rows..candles.len() {
            let prev = candles[i - self.rows].close;
            result[i] = (candles[i].close - prev) / prev;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_candles, DEFAULT_EPSILON};

    #[test]
    fn pct_change_known_values() {
        let candles = make_candles(&[100.0, 110.0, 99.0]);
        let result = PctChange::new(1).compute(&candles);
        assert!(result[0].is_nan());
        assert_approx(result[1], 0.1, DEFAULT_EPSILON);
        assert_approx(result[2], -0.1, DEFAULT_EPSILON);
    }

    #[test]
    fn presets_cover_hour_day_week() {
        assert_eq!(PctChange::hour().lookback(), 60);
        assert_eq!(PctChange::day().lookback(), 1_440);
        assert_eq!(PctChange::week().lookback(), 10_080);
        assert_eq!(PctChange::day().name(), "pct_change_1440");
    }

    #[test]
    fn series_shorter_than_lookback_is_all_nan() {
        let candles = make_candles(&[1.0, 2.0, 3.0]);
        assert!(PctChange::hour().compute(&candles).iter().all(|v| v.is_nan()));
    }
}
