//! Williams fractals (5-candle swing pivots).
//!
//! A bullish fractal marks a swing low: the candle's low is strictly below the
//! lows of the two candles on each side. A bearish fractal is the mirror image
//! on highs. The marker value is the pivot price itself.
//!
//! Candidates are evaluated as the centre `k = i - 3` of a window ending at
//! row `i`, for every `i` in `5..len`. The first two and the last three rows
//! are therefore never marked.

use crate::domain::Candle;

/// Nullable fractal markers aligned to the candle series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fractals {
    pub bull: Vec<Option<f64>>,
    pub bear: Vec<Option<f64>>,
}

pub fn mark_fractals(candles: &[Candle]) -> Fractals {
    let n = candles.len();
    let mut fractals = Fractals {
        bull: vec![None; n],
        bear: vec![None; n],
    };

    for i in 5..n {
        let k = i - 3;
        let neighbours = [k - 2, k - 1, k + 1, k + 2];

        let low = candles[k].low;
        if neighbours.iter().all(|&j| low < candles[j].low) {
            fractals.bull[k] = Some(low);
        }

        let high = candles[k].high;
        if neighbours.iter().all(|&j| high > candles[j].high) {
            fractals.bear[k] = Some(high);
        }
    }

    fractals
}
