//! IndicatorFrame: candles aligned with the columns the fractal strategy reads.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{mark_fractals, Ema, Indicator};
use crate::domain::{Candle, TimestampMs};

#[derive(Debug, Error, PartialEq)]
pub enum FrameError {
    #[error("column '{column}' has {actual} rows, expected {expected}")]
    LengthMismatch {
        column: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid EMA spans: {0}")]
    InvalidSpans(String),
}

/// Spans of the three trend EMAs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmaSpans {
    pub fast: usize,
    pub mid: usize,
    pub slow: usize,
}

impl Default for EmaSpans {
    fn default() -> Self {
        Self {
            fast: 20,
            mid: 50,
            slow: 100,
        }
    }
}

impl EmaSpans {
    /// Spans must be non-zero and strictly increasing.
    pub fn validate(&self) -> Result<(), FrameError> {
        if self.fast == 0 {
            return Err(FrameError::InvalidSpans("spans must be >= 1".into()));
        }
        if !(self.fast < self.mid && self.mid < self.slow) {
            return Err(FrameError::InvalidSpans(format!(
                "expected fast < mid < slow, got {} / {} / {}",
                self.fast, self.mid, self.slow
            )));
        }
        Ok(())
    }
}

/// One row of an [`IndicatorFrame`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRow {
    pub time: TimestampMs,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub ema_fast: f64,
    pub ema_mid: f64,
    pub ema_slow: f64,
    pub bull_fractal: Option<f64>,
    pub bear_fractal: Option<f64>,
}

/// Time-ordered candles with precomputed EMAs and fractal markers.
///
/// Every column has exactly one entry per candle.
#[derive(Debug, Clone)]
pub struct IndicatorFrame {
    candles: Vec<Candle>,
    ema_fast: Vec<f64>,
    ema_mid: Vec<f64>,
    ema_slow: Vec<f64>,
    bull_fractal: Vec<Option<f64>>,
    bear_fractal: Vec<Option<f64>>,
}

impl IndicatorFrame {
    /// Compute EMAs and fractals from candles.
    pub fn build(candles: Vec<Candle>, spans: &EmaSpans) -> Result<Self, FrameError> {
        spans.validate()?;
        let ema_fast = Ema::new(spans.fast).compute(&candles);
        let ema_mid = Ema::new(spans.mid).compute(&candles);
        let ema_slow = Ema::new(spans.slow).compute(&candles);
        let fractals = mark_fractals(&candles);

        Ok(Self {
            candles,
            ema_fast,
            ema_mid,
            ema_slow,
            bull_fractal: fractals.bull,
            bear_fractal: fractals.bear,
        })
    }

    /// Assemble a frame from precomputed columns.
    pub fn from_columns(
        candles: Vec<Candle>,
        ema_fast: Vec<f64>,
        ema_mid: Vec<f64>,
        ema_slow: Vec<f64>,
        bull_fractal: Vec<Option<f64>>,
        bear_fractal: Vec<Option<f64>>,
    ) -> Result<Self, FrameError> {
        let expected = candles.len();
        let lengths = [
            ("ema_fast", ema_fast.len()),
            ("ema_mid", ema_mid.len()),
            ("ema_slow", ema_slow.len()),
            ("bull_fractal", bull_fractal.len()),
            ("bear_fractal", bear_fractal.len()),
        ];
        for (column, actual) in lengths {
            if actual != expected {
                return Err(FrameError::LengthMismatch {
                    column,
                    expected,
                    actual,
                });
            }
        }

        Ok(Self {
            candles,
            ema_fast,
            ema_mid,
            ema_slow,
            bull_fractal,
            bear_fractal,
        })
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    /// Row `i`. Panics if out of bounds, like slice indexing.
    pub fn row(&self, i: usize) -> FrameRow {
        let c = &self.candles[i];
        FrameRow {
            time: c.time,
            open: c.open,
            high: c.high,
            low: c.low,
            close: c.close,
            volume: c.volume,
            ema_fast: self.ema_fast[i],
            ema_mid: self.ema_mid[i],
            ema_slow: self.ema_slow[i],
            bull_fractal: self.bull_fractal[i],
            bear_fractal: self.bear_fractal[i],
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = FrameRow> + '_ {
        (0..self.len()).map(|i| self.row(i))
    }
}
