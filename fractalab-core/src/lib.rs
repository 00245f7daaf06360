//! Fractalab Core: candles, indicator frame, fractal signals, backtest engine.
//!
//! This crate contains the offline strategy evaluation pipeline:
//! - Domain types (candles, signals, trades, the single-position account)
//! - Indicator provider (adjusted EMAs, Williams fractals, supplementary stats)
//! - Fractal signal generator (two-state scan over the indicator frame)
//! - Backtest engine (signal replay and aggregate statistics)
//! - Candle table loading from Parquet, Arrow IPC or CSV

pub mod data;
pub mod domain;
pub mod engine;
pub mod indicators;
pub mod signals;
