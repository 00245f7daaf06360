//! Fractalab Runner: configuration, data loading, pipeline runs, sweeps and reports.
//!
//! This crate builds on `fractalab-core` to provide:
//! - TOML run configuration with validation and fingerprinting
//! - Candle loading from file or a seeded synthetic walk (tagged)
//! - Single-run pipeline (indicators, signals, backtest)
//! - Parallel target-ratio sweep
//! - Text summaries and JSON/CSV artifacts

pub mod config;
pub mod data_loader;
pub mod reporting;
pub mod runner;
pub mod sweep;

pub use config::{ConfigError, DataConfig, RunConfig, StrategyConfig, SweepConfig};
pub use data_loader::{
    compute_dataset_hash, generate_synthetic_candles, load_data, LoadError, LoadedData,
};
pub use reporting::{ArtifactManager, ArtifactPaths};
pub use runner::{
    compute_run_id, evaluate, run_from_config, run_pipeline, Evaluation, RunError, RunReport,
    SCHEMA_VERSION,
};
pub use sweep::{run_sweep, SweepEntry, SweepResults};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn config_types_are_send_sync() {
        assert_send::<RunConfig>();
        assert_sync::<RunConfig>();
        assert_send::<StrategyConfig>();
        assert_sync::<StrategyConfig>();
    }

    #[test]
    fn loaded_data_is_send_sync() {
        assert_send::<LoadedData>();
        assert_sync::<LoadedData>();
    }

    #[test]
    fn run_report_is_send_sync() {
        assert_send::<RunReport>();
        assert_sync::<RunReport>();
    }

    #[test]
    fn sweep_results_are_send_sync() {
        assert_send::<SweepResults>();
        assert_sync::<SweepResults>();
    }
}
