//! Candle loading for the runner.
//!
//! Resolution order:
//! 1. `synthetic_rows` set → seeded random walk (tagged synthetic)
//! 2. `path` set → file via `fractalab_core::data::load_candles`
//! 3. Otherwise → fail with a clear error
//!
//! Results produced on synthetic data carry `has_synthetic = true` in every
//! report and artifact.

use crate::config::DataConfig;
use fractalab_core::data::{detect_anomalies, load_candles, AnomalyReport, DataError};
use fractalab_core::domain::{Candle, TimestampMs, MINUTE_MS};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

/// 2023-01-01T00:00:00Z, first synthetic candle.
pub const SYNTHETIC_START_MS: TimestampMs = 1_672_531_200_000;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no data source configured (set data.path or use --synthetic)")]
    NoSource,

    #[error("failed to load {}: {source}", path.display())]
    Data {
        path: PathBuf,
        #[source]
        source: DataError,
    },
}

/// Candles plus provenance.
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub candles: Vec<Candle>,
    /// BLAKE3 over every candle, see [`compute_dataset_hash`].
    pub dataset_hash: String,
    pub has_synthetic: bool,
    pub anomalies: Vec<AnomalyReport>,
}

impl LoadedData {
    /// Wrap already-loaded candles, computing hash and anomaly report.
    pub fn from_candles(candles: Vec<Candle>, has_synthetic: bool) -> Self {
        let anomalies = detect_anomalies(&candles);
        for anomaly in &anomalies {
            warn!(
                kind = ?anomaly.anomaly_type,
                count = anomaly.count,
                first_row = anomaly.first_row,
                "data anomaly"
            );
        }
        Self {
            dataset_hash: compute_dataset_hash(&candles),
            candles,
            has_synthetic,
            anomalies,
        }
    }

    pub fn first_time(&self) -> Option<TimestampMs> {
        self.candles.first().map(|c| c.time)
    }

    pub fn last_time(&self) -> Option<TimestampMs> {
        self.candles.last().map(|c| c.time)
    }
}

pub fn load_data(config: &DataConfig) -> Result<LoadedData, LoadError> {
    if let Some(rows) = config.synthetic_rows {
        warn!(
            rows,
            seed = config.seed,
            "generating synthetic candles, results will be tagged as synthetic"
        );
        let candles = generate_synthetic_candles(rows, config.seed);
        return Ok(LoadedData::from_candles(candles, true));
    }

    let path = config.path.as_ref().ok_or(LoadError::NoSource)?;
    let candles = load_candles(path).map_err(|source| LoadError::Data {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), rows = candles.len(), "loaded candles");
    Ok(LoadedData::from_candles(candles, false))
}

/// Deterministic BLAKE3 hash over time and OHLCV of every candle, in order.
pub fn compute_dataset_hash(candles: &[Candle]) -> String {
    let mut hasher = blake3::Hasher::new();
    for c in candles {
        hasher.update(&c.time.to_le_bytes());
        hasher.update(&c.open.to_le_bytes());
        hasher.update(&c.high.to_le_bytes());
        hasher.update(&c.low.to_le_bytes());
        hasher.update(&c.close.to_le_bytes());
        hasher.update(&c.volume.to_le_bytes());
    }
    hasher.finalize().to_hex().to_string()
}

/// Seeded random walk of 1-minute candles starting at 100.0.
///
/// Drift flips every few hundred rows so that the series contains both
/// trending and ranging stretches.
pub fn generate_synthetic_candles(rows: usize, seed: u64) -> Vec<Candle> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut candles = Vec::with_capacity(rows);
    let mut price = 100.0_f64;
    let mut drift = 0.0002_f64;

    for i in 0..rows {
        if i % 400 == 0 {
            drift = rng.gen_range(-0.0004..0.0004);
        }
        let ret: f64 = drift + rng.gen_range(-0.002..0.002);
        let open = price;
        let close = price * (1.0 + ret);
        let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.001));
        let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.001));
        let volume = rng.gen_range(1.0..50.0);

        candles.push(Candle {
            time: SYNTHETIC_START_MS + i as TimestampMs * MINUTE_MS,
            open,
            high,
            low,
            close,
            volume,
        });
        price = close;
    }

    candles
}
