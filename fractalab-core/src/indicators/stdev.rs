//! Rolling sample standard deviation of close.
//!
//! std[t] = sqrt( sum((close[i] - mean)^2) / (window - 1) ) over the trailing window.
//! Rows before the window is full are NaN; a window of 1 is always NaN.

use super::Indicator;
use crate::domain::Candle;

#[derive(Debug, Clone)]
pub struct RollingStd {
    window: usize,
    name: String,
}

impl RollingStd {
    pub fn new(window: usize) -> Self {
        assert!(window >= 1, "RollingStd window must be >= 1");
        Self {
            window,
            name: format!("std_{window}"),
        }
    }
}

impl Indicator for RollingStd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.window - 1
    }

    fn compute(&self, candles: &[Candle]) -> Vec<f64> {
        let n = candles.len();
        let mut result = vec![f64::NAN; n];
        if self.window < 2 || n < self.window {
            return result;
        }

        let w = self.window as f64;
        for end in self.window..=n {
            let slice = &candles[end - self.window..end];
            let mean = slice.iter().map(|c| c.close).sum::<f64>() / w;
            let ss: f64 = slice.iter().map(|c| (c.close - mean).powi(2)).sum();
            result[end - 1] = (ss / (w - 1.0)).sqrt();
        }
        result
    }
}
