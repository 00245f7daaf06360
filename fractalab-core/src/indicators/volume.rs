//! Running daily volume.
//!
//! Volume accumulated since the most recent candle stamped 00:00 UTC. The
//! midnight candle resets the running total to zero, so its own volume is not
//! counted. Rows before the first midnight candle are NaN.

use super::Indicator;
use crate::domain::{Candle, TimestampMs, MINUTE_MS};

const DAY_MS: TimestampMs = 86_400_000;

#[derive(Debug, Clone, Default)]
pub struct DailyVolume;

fn starts_day(time: TimestampMs) -> bool {
    // 00:00 to 00:00:59.999, matching on hour and minute only
    time.rem_euclid(DAY_MS) < MINUTE_MS
}

impl Indicator for DailyVolume {
    fn name(&self) -> &str {
        "daily_volume"
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, candles: &[Candle]) -> Vec<f64> {
        let mut result = vec![f64::NAN; candles.len()];
        let mut cumulative = 0.0;
        let mut offset: Option<f64> = None;

        for (i, candle) in candles.iter().enumerate() {
            cumulative += candle.volume;
            if starts_day(candle.time) {
                offset = Some(cumulative);
            }
            if let Some(start) = offset {
                result[i] = cumulative - start;
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    fn candle(time: TimestampMs, volume: f64) -> Candle {
        Candle {
            time,
            open: 1.0,
            high: 1.0,
            low: 1.0,
            close: 1.0,
            volume,
        }
    }

    #[test]
    fn resets_at_midnight() {
        let m = 60_000;
        let candles = [
            candle(DAY_MS - 2 * m, 5.0),
            candle(DAY_MS - m, 5.0),
            candle(DAY_MS, 7.0),
            candle(DAY_MS + m, 3.0),
            candle(DAY_MS + 2 * m, 4.0),
        ];
        let result = DailyVolume.compute(&candles);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_approx(result[2], 0.0, DEFAULT_EPSILON);
        assert_approx(result[3], 3.0, DEFAULT_EPSILON);
        assert_approx(result[4], 7.0, DEFAULT_EPSILON);
    }

    #[test]
    fn second_midnight_restarts_total() {
        let candles = [
            candle(0, 1.0),
            candle(60_000, 2.0),
            candle(DAY_MS, 4.0),
            candle(DAY_MS + 60_000, 8.0),
        ];
        let result = DailyVolume.compute(&candles);
        assert_approx(result[1], 2.0, DEFAULT_EPSILON);
        assert_approx(result[2], 0.0, DEFAULT_EPSILON);
        assert_approx(result[3], 8.0, DEFAULT_EPSILON);
    }
}
