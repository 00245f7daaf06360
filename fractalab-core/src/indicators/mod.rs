//! Indicator provider: EMAs, Williams fractals and supplementary statistics.
//!
//! Series indicators implement [`Indicator`] and are precomputed once over the
//! whole candle history. The fractal markers are nullable prices and live in
//! [`fractal`]. [`IndicatorFrame`] bundles everything the signal generator reads.

pub mod change;
pub mod ema;
pub mod fractal;
pub mod frame;
pub mod snapshot;
pub mod stdev;
pub mod volume;

pub use change::PctChange;
pub use ema::{ema_of_series, Ema};
pub use fractal::{mark_fractals, Fractals};
pub use frame::{EmaSpans, FrameError, FrameRow, IndicatorFrame};
pub use snapshot::MarketSnapshot;
pub use stdev::RollingStd;
pub use volume::DailyVolume;

use crate::domain::Candle;

/// Trait for series indicators.
///
/// Indicators take a full candle series and produce a numeric output series of
/// the same length. Rows without a defined value hold `f64::NAN`.
///
/// No value at row t may depend on candles after row t.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "ema_20", "pct_change_60").
    fn name(&self) -> &str;

    /// Number of leading rows that may be undefined or still converging.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire candle series.
    fn compute(&self, candles: &[Candle]) -> Vec<f64>;
}

/// Create synthetic one-minute candles from close prices for testing.
///
/// open = prev_close (or close for the first candle),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 10.
#[cfg(test)]
pub fn make_candles(closes: &[f64]) -> Vec<Candle> {
    use crate::domain::MINUTE_MS;
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Candle {
                time: i as i64 * MINUTE_MS,
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 10.0,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
