//! Exponential Moving Average (EMA), adjusted form.
//!
//! alpha = 2 / (span + 1)
//! num[t] = close[t] + (1 - alpha) * num[t-1]
//! den[t] = 1 + (1 - alpha) * den[t-1]
//! EMA[t] = num[t] / den[t]
//!
//! The normalisation over the partial history means the series is defined
//! from the first row; early values are simply less smoothed.

use super::Indicator;
use crate::domain::Candle;

#[derive(Debug, Clone)]
pub struct Ema {
    span: usize,
    name: String,
}

impl Ema {
    pub fn new(span: usize) -> Self {
        assert!(span >= 1, "EMA span must be >= 1");
        Self {
            span,
            name: format!("ema_{span}"),
        }
    }

    pub fn span(&self) -> usize {
        self.span
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.span
    }

    fn compute(&self, candles: &[Candle]) -> Vec<f64> {
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        ema_of_series(&closes, self.span)
    }
}

/// Adjusted EMA of an arbitrary series.
///
/// NaN inputs are skipped without resetting: the accumulated weights still
/// decay by one step, so the output holds its last value and later inputs
/// weigh as if the gap were there (pandas `ewm(adjust=True)` with
/// `ignore_na=False`). Leading NaNs stay NaN.
pub fn ema_of_series(values: &[f64], span: usize) -> Vec<f64> {
    let mut result = vec![f64::NAN; values.len()];
    if span == 0 {
        return result;
    }

    let decay = 1.0 - 2.0 / (span as f64 + 1.0);
    let mut num = 0.0;
    let mut den = 0.0;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            num *= decay;
            den *= decay;
        } else {
            num = v + decay * num;
            den = 1.0 + decay * den;
        }
        if den > 0.0 {
            result[i] = num / den;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_candles, DEFAULT_EPSILON};

    #[test]
    fn ema_span_1_equals_close() {
        let candles = make_candles(&[100.0, 200.0, 300.0]);
        let result = Ema::new(1).compute(&candles);
        assert_approx(result[0], 100.0, DEFAULT_EPSILON);
        assert_approx(result[1], 200.0, DEFAULT_EPSILON);
        assert_approx(result[2], 300.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_3_known_values() {
        // alpha = 0.5, decay = 0.5
        // t0: 10 / 1 = 10
        // t1: (11 + 5) / 1.5 = 10.666..
        // t2: (12 + 8) / 1.75 = 11.428571..
        let candles = make_candles(&[10.0, 11.0, 12.0]);
        let result = Ema::new(3).compute(&candles);
        assert_approx(result[0], 10.0, DEFAULT_EPSILON);
        assert_approx(result[1], 16.0 / 1.5, DEFAULT_EPSILON);
        assert_approx(result[2], 20.0 / 1.75, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_of_constant_is_constant() {
        let result = ema_of_series(&[42.0; 50], 20);
        for v in result {
            assert_approx(v, 42.0, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn ema_skips_nan_like_pandas() {
        // decay = 0.5
        // t1: (11 + 5) / 1.5
        // t2: NaN, num 8 den 0.75, value unchanged
        // t3: (13 + 4) / (1 + 0.375) = 12.363636..
        let result = ema_of_series(&[10.0, 11.0, f64::NAN, 13.0], 3);
        assert_approx(result[1], 16.0 / 1.5, DEFAULT_EPSILON);
        assert_approx(result[2], result[1], DEFAULT_EPSILON);
        assert_approx(result[3], 17.0 / 1.375, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_leading_nan_stays_nan() {
        let result = ema_of_series(&[f64::NAN, f64::NAN, 10.0, 12.0], 3);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_approx(result[2], 10.0, DEFAULT_EPSILON);
        assert_approx(result[3], 17.0 / 1.5, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_is_not_lookahead() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64 * 0.7).sin()).collect();
        let full = ema_of_series(&closes, 10);
        let truncated = ema_of_series(&closes[..25], 10);
        for i in 0..25 {
            assert_approx(full[i], truncated[i], DEFAULT_EPSILON);
        }
    }

    #[test]
    fn ema_name_and_lookback() {
        let ema = Ema::new(20);
        assert_eq!(ema.name(), "ema_20");
        assert_eq!(ema.lookback(), 20);
    }
}
