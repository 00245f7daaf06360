//! Serializable run configuration, loaded from TOML.
//!
//! Every section is optional; an empty file describes the default strategy
//! (EMAs 20/50/100, target ratio 1.5, 100 warm-up rows).

use fractalab_core::indicators::EmaSpans;
use fractalab_core::signals::{FractalConfig, CONFIRMATION_ROWS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    pub data: DataConfig,
    pub strategy: StrategyConfig,
    pub sweep: SweepConfig,
}

/// Where candles come from. `synthetic_rows` takes precedence over `path`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DataConfig {
    pub path: Option<PathBuf>,
    pub synthetic_rows: Option<usize>,
    pub seed: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: None,
            synthetic_rows: None,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StrategyConfig {
    pub target_ratio: f64,
    pub ema_fast: usize,
    pub ema_mid: usize,
    pub ema_slow: usize,
    pub warmup_rows: usize,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        let spans = EmaSpans::default();
        let fractal = FractalConfig::default();
        Self {
            target_ratio: fractal.target_ratio,
            ema_fast: spans.fast,
            ema_mid: spans.mid,
            ema_slow: spans.slow,
            warmup_rows: fractal.warmup_rows,
        }
    }
}

impl StrategyConfig {
    pub fn spans(&self) -> EmaSpans {
        EmaSpans {
            fast: self.ema_fast,
            mid: self.ema_mid,
            slow: self.ema_slow,
        }
    }

    pub fn fractal(&self) -> FractalConfig {
        FractalConfig {
            target_ratio: self.target_ratio,
            warmup_rows: self.warmup_rows,
        }
    }

    pub fn with_target_ratio(mut self, target_ratio: f64) -> Self {
        self.target_ratio = target_ratio;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_ratio(self.target_ratio)?;
        if self.warmup_rows.checked_add(CONFIRMATION_ROWS).is_none() {
            return Err(ConfigError::Invalid(format!(
                "warmup_rows {} is too large",
                self.warmup_rows
            )));
        }
        self.spans()
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Deterministic BLAKE3 fingerprint of the strategy parameters.
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.target_ratio.to_le_bytes());
        for value in [self.ema_fast, self.ema_mid, self.ema_slow, self.warmup_rows] {
            hasher.update(&(value as u64).to_le_bytes());
        }
        hasher.finalize().to_hex().to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SweepConfig {
    pub target_ratios: Vec<f64>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            target_ratios: vec![1.0, 1.5, 2.0, 2.5, 3.0],
        }
    }
}

impl RunConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Parse and validate.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.strategy.validate()?;
        if self.sweep.target_ratios.is_empty() {
            return Err(ConfigError::Invalid(
                "sweep.target_ratios must not be empty".into(),
            ));
        }
        for &ratio in &self.sweep.target_ratios {
            validate_ratio(ratio)?;
        }
        Ok(())
    }
}

fn validate_ratio(ratio: f64) -> Result<(), ConfigError> {
    if !ratio.is_finite() || ratio < 0.0 {
        return Err(ConfigError::Invalid(format!(
            "target ratio must be finite and >= 0, got {ratio}"
        )));
    }
    Ok(())
}
