//! Pipeline runner: wires indicators, signal generation and the backtest.
//!
//! Two entry points:
//! - `run_from_config()`: validates config, loads data, then runs. Used by the CLI.
//! - `run_pipeline()`: takes pre-loaded data. Used by tests and the sweep.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use fractalab_core::domain::{Signal, TimestampMs};
use fractalab_core::engine::{run_backtest, BacktestError, BacktestResult};
use fractalab_core::indicators::{FrameError, IndicatorFrame};
use fractalab_core::signals::{FractalConfig, FractalSignalGenerator, ScanStats};

use crate::config::{ConfigError, RunConfig, StrategyConfig};
use crate::data_loader::{load_data, LoadError, LoadedData};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("data error: {0}")]
    Data(#[from] LoadError),
    #[error("indicator error: {0}")]
    Frame(#[from] FrameError),
    #[error("backtest error: {0}")]
    Backtest(#[from] BacktestError),
}

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

/// Complete result of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunReport {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    /// BLAKE3 over strategy fingerprint and dataset hash.
    pub run_id: String,
    pub dataset_hash: String,
    pub has_synthetic: bool,
    pub strategy: StrategyConfig,
    pub candle_count: usize,
    pub first_time: Option<TimestampMs>,
    pub last_time: Option<TimestampMs>,
    /// Fewer candles than the strategy needs; no signals were produced.
    pub insufficient_data: bool,
    pub signals: Vec<Signal>,
    pub scan_stats: ScanStats,
    pub result: BacktestResult,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Signals, stats and backtest result for one generator config.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub insufficient_data: bool,
    pub signals: Vec<Signal>,
    pub scan_stats: ScanStats,
    pub result: BacktestResult,
}

/// Scan a prepared frame and replay its signals. No I/O.
pub fn evaluate(frame: &IndicatorFrame, config: FractalConfig) -> Result<Evaluation, RunError> {
    let generator = FractalSignalGenerator::new(config);
    let Some(outcome) = generator.scan(frame) else {
        return Ok(Evaluation {
            insufficient_data: true,
            signals: Vec::new(),
            scan_stats: ScanStats::default(),
            result: BacktestResult::empty(),
        });
    };

    let result = run_backtest(frame.candles(), &outcome.signals)?;
    Ok(Evaluation {
        insufficient_data: false,
        signals: outcome.signals,
        scan_stats: outcome.stats,
        result,
    })
}

pub fn run_from_config(config: &RunConfig) -> Result<RunReport, RunError> {
    config.validate()?;
    let loaded = load_data(&config.data)?;
    run_pipeline(&loaded, &config.strategy)
}

/// Run the full pipeline on pre-loaded candles.
pub fn run_pipeline(loaded: &LoadedData, strategy: &StrategyConfig) -> Result<RunReport, RunError> {
    strategy.validate()?;
    let frame = IndicatorFrame::build(loaded.candles.clone(), &strategy.spans())?;
    let evaluation = evaluate(&frame, strategy.fractal())?;

    if evaluation.insufficient_data {
        warn!(
            rows = loaded.candles.len(),
            required = strategy.fractal().min_rows(),
            "insufficient data, no signals generated"
        );
    }

    let run_id = compute_run_id(strategy, &loaded.dataset_hash);
    info!(
        run_id = %short_id(&run_id),
        signals = evaluation.signals.len(),
        trades = evaluation.result.num_trades,
        end_value = evaluation.result.end_portfolio_value,
        "run complete"
    );

    Ok(RunReport {
        schema_version: SCHEMA_VERSION,
        run_id,
        dataset_hash: loaded.dataset_hash.clone(),
        has_synthetic: loaded.has_synthetic,
        strategy: *strategy,
        candle_count: loaded.candles.len(),
        first_time: loaded.first_time(),
        last_time: loaded.last_time(),
        insufficient_data: evaluation.insufficient_data,
        signals: evaluation.signals,
        scan_stats: evaluation.scan_stats,
        result: evaluation.result,
    })
}

pub fn compute_run_id(strategy: &StrategyConfig, dataset_hash: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(strategy.fingerprint().as_bytes());
    hasher.update(dataset_hash.as_bytes());
    hasher.finalize().to_hex().to_string()
}

/// First 12 hex chars, used for directory names and log lines.
pub fn short_id(run_id: &str) -> &str {
    &run_id[..run_id.len().min(12)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_loader::generate_synthetic_candles;

    fn synthetic(rows: usize) -> LoadedData {
        LoadedData::from_candles(generate_synthetic_candles(rows, 42), true)
    }

    #[test]
    fn short_data_yields_insufficient_report() {
        let loaded = synthetic(50);
        let report = run_pipeline(&loaded, &StrategyConfig::default()).unwrap();
        assert!(report.insufficient_data);
        assert!(report.signals.is_empty());
        assert_eq!(report.result, BacktestResult::empty());
        assert_eq!(report.candle_count, 50);
        assert!(report.has_synthetic);
    }

    #[test]
    fn run_id_depends_on_strategy_and_data() {
        let loaded = synthetic(300);
        let base = StrategyConfig::default();
        let a = run_pipeline(&loaded, &base).unwrap();
        let b = run_pipeline(&loaded, &base).unwrap();
        let c = run_pipeline(&loaded, &base.with_target_ratio(2.5)).unwrap();
        assert_eq!(a.run_id, b.run_id);
        assert_ne!(a.run_id, c.run_id);
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_strategy_is_rejected() {
        let loaded = synthetic(300);
        let strategy = StrategyConfig {
            ema_fast: 0,
            ..StrategyConfig::default()
        };
        let err = run_pipeline(&loaded, &strategy).unwrap_err();
        assert!(matches!(err, RunError::Config(_)));
    }

    #[test]
    fn short_id_truncates() {
        assert_eq!(short_id("abcdef0123456789"), "abcdef012345");
        assert_eq!(short_id("abc"), "abc");
    }
}
