//! Target-ratio sweep over one indicator frame.
//!
//! The frame is built once; each ratio runs scan + backtest in parallel via
//! rayon. Entries are ranked by end portfolio value (descending), ties
//! broken by the smaller ratio.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::info;

use fractalab_core::engine::BacktestResult;
use fractalab_core::indicators::IndicatorFrame;
use fractalab_core::signals::ScanStats;

use crate::config::{ConfigError, StrategyConfig};
use crate::data_loader::LoadedData;
use crate::runner::{evaluate, RunError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SweepEntry {
    pub target_ratio: f64,
    pub signal_count: usize,
    pub scan_stats: ScanStats,
    pub result: BacktestResult,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SweepResults {
    pub dataset_hash: String,
    pub has_synthetic: bool,
    pub insufficient_data: bool,
    /// Ranked, best first.
    pub entries: Vec<SweepEntry>,
}

impl SweepResults {
    pub fn best(&self) -> Option<&SweepEntry> {
        self.entries.first()
    }
}

pub fn run_sweep(
    loaded: &LoadedData,
    strategy: &StrategyConfig,
    ratios: &[f64],
) -> Result<SweepResults, RunError> {
    if ratios.is_empty() {
        return Err(ConfigError::Invalid("sweep needs at least one target ratio".into()).into());
    }
    for &ratio in ratios {
        strategy.with_target_ratio(ratio).validate()?;
    }

    let frame = IndicatorFrame::build(loaded.candles.clone(), &strategy.spans())?;

    let evaluations = ratios
        .par_iter()
        .map(|&ratio| {
            let config = strategy.with_target_ratio(ratio).fractal();
            evaluate(&frame, config).map(|e| (ratio, e))
        })
        .collect::<Result<Vec<_>, RunError>>()?;

    let insufficient_data = evaluations.iter().any(|(_, e)| e.insufficient_data);
    let mut entries: Vec<SweepEntry> = evaluations
        .into_iter()
        .map(|(target_ratio, e)| SweepEntry {
            target_ratio,
            signal_count: e.signals.len(),
            scan_stats: e.scan_stats,
            result: e.result,
        })
        .collect();
    rank(&mut entries);

    if let Some(best) = entries.first() {
        info!(
            ratios = entries.len(),
            best_ratio = best.target_ratio,
            best_end_value = best.result.end_portfolio_value,
            "sweep complete"
        );
    }

    Ok(SweepResults {
        dataset_hash: loaded.dataset_hash.clone(),
        has_synthetic: loaded.has_synthetic,
        insufficient_data,
        entries,
    })
}

fn rank(entries: &mut [SweepEntry]) {
    entries.sort_by(|a, b| {
        b.result
            .end_portfolio_value
            .partial_cmp(&a.result.end_portfolio_value)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.target_ratio.total_cmp(&b.target_ratio))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(target_ratio: f64, end_value: f64) -> SweepEntry {
        let mut result = BacktestResult::empty();
        result.end_portfolio_value = end_value;
        SweepEntry {
            target_ratio,
            signal_count: 0,
            scan_stats: ScanStats::default(),
            result,
        }
    }

    #[test]
    fn rank_orders_by_end_value_then_ratio() {
        let mut entries = vec![
            entry(3.0, 101.0),
            entry(1.0, 99.0),
            entry(2.0, 105.0),
            entry(1.5, 101.0),
        ];
        rank(&mut entries);
        let ratios: Vec<f64> = entries.iter().map(|e| e.target_ratio).collect();
        assert_eq!(ratios, vec![2.0, 1.5, 3.0, 1.0]);
    }

    #[test]
    fn empty_ratio_list_is_rejected() {
        let loaded = LoadedData::from_candles(Vec::new(), false);
        let err = run_sweep(&loaded, &StrategyConfig::default(), &[]).unwrap_err();
        assert!(matches!(err, RunError::Config(_)));
    }
}
