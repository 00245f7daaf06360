//! Trading signals: a timestamped buy or sell instruction.

use serde::{Deserialize, Serialize};

use super::TimestampMs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalDirection {
    Buy,
    Sell,
}

/// A buy or sell instruction at a candle timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    pub time: TimestampMs,
    pub direction: SignalDirection,
}

impl Signal {
    pub fn buy(time: TimestampMs) -> Self {
        Self {
            time,
            direction: SignalDirection::Buy,
        }
    }

    pub fn sell(time: TimestampMs) -> Self {
        Self {
            time,
            direction: SignalDirection::Sell,
        }
    }

    pub fn is_buy(&self) -> bool {
        self.direction == SignalDirection::Buy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_serializes_uppercase() {
        let json = serde_json::to_string(&Signal::sell(60_000)).unwrap();
        assert_eq!(json, r#"{"time":60000,"direction":"SELL"}"#);
    }
}
