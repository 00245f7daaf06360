//! Domain types for fractalab

pub mod account;
pub mod candle;
pub mod signal;
pub mod trade;

pub use account::{Account, PositionState, STARTING_VALUE};
pub use candle::{Candle, MINUTE_MS};
pub use signal::{Signal, SignalDirection};
pub use trade::Trade;

/// Epoch timestamp in milliseconds.
pub type TimestampMs = i64;
