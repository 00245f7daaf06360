//! Artifact manager for persisting run outputs.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use super::trades;
use crate::runner::{short_id, RunReport};
use crate::sweep::SweepResults;

#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub run_dir: PathBuf,
    pub report_json: PathBuf,
    pub trades_csv: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ArtifactManager {
    output_dir: PathBuf,
}

impl ArtifactManager {
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&output_dir)
            .context("Failed to create artifact output directory")?;
        Ok(Self { output_dir })
    }

    /// Write `report.json` and `trades.csv` under `<output>/<short run id>/`.
    pub fn save_run(&self, report: &RunReport) -> Result<ArtifactPaths> {
        let run_dir = self.output_dir.join(short_id(&report.run_id));
        std::fs::create_dir_all(&run_dir)
            .with_context(|| format!("Failed to create run directory {}", run_dir.display()))?;

        let report_json = run_dir.join("report.json");
        write_json(&report_json, report)?;

        let trades_csv = run_dir.join("trades.csv");
        trades::write_trades_csv(&trades_csv, &report.result)?;

        info!(dir = %run_dir.display(), "artifacts written");
        Ok(ArtifactPaths {
            run_dir,
            report_json,
            trades_csv,
        })
    }

    /// Write `sweep-<dataset hash prefix>.json`.
    pub fn save_sweep(&self, sweep: &SweepResults) -> Result<PathBuf> {
        let path = self
            .output_dir
            .join(format!("sweep-{}.json", short_id(&sweep.dataset_hash)));
        write_json(&path, sweep)?;
        info!(path = %path.display(), "sweep written");
        Ok(path)
    }
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize report")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
