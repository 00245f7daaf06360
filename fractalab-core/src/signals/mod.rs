//! Signal generation over a precomputed indicator frame.
//!
//! Generators only read market data; they never see the account being
//! backtested. Output is a time-ordered list of buy/sell signals.

pub mod fractal;

pub use fractal::{
    EntryZone, ExitReason, FractalConfig, FractalSignalGenerator, ScanOutcome, ScanStats,
    CONFIRMATION_ROWS,
};
