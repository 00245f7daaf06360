//! Fractalab CLI: run, sweep and market stats commands.
//!
//! Commands:
//! - `run`: scan one candle file with the fractal strategy and backtest the signals
//! - `sweep`: rerun the backtest over several target ratios and rank them
//! - `stats`: print a market snapshot for the latest candle

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fractalab_core::indicators::MarketSnapshot;
use fractalab_runner::reporting::{format_timestamp, render_run_summary, render_sweep_table};
use fractalab_runner::{load_data, run_pipeline, run_sweep, ArtifactManager, RunConfig};

#[derive(Parser)]
#[command(
    name = "fractalab",
    about = "Fractalab CLI: Williams fractal signals and single-position backtests on 1-minute candles"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Data source flags shared by every command.
#[derive(Args)]
struct DataArgs {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Candle file (.parquet, .feather/.arrow/.ipc, .csv). Overrides data.path
    /// and any data.synthetic_rows from the config.
    #[arg(long, conflicts_with = "synthetic")]
    data: Option<PathBuf>,

    /// Generate this many synthetic candles instead of reading a file.
    #[arg(long)]
    synthetic: Option<usize>,
}

impl DataArgs {
    fn resolve(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_file(path)?,
            None => RunConfig::default(),
        };
        if let Some(path) = &self.data {
            config.data.path = Some(path.clone());
            config.data.synthetic_rows = None;
        }
        if self.synthetic.is_some() {
            config.data.synthetic_rows = self.synthetic;
        }
        if config.data.path.is_none() && config.data.synthetic_rows.is_none() {
            bail!("no candle source: pass --data <file>, --synthetic <rows> or set data.path");
        }
        info!(
            config = ?self.config,
            path = ?config.data.path,
            synthetic_rows = ?config.data.synthetic_rows,
            "resolved data source"
        );
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate signals and backtest them once.
    Run {
        #[command(flatten)]
        data: DataArgs,

        /// Override strategy.target_ratio.
        #[arg(long)]
        target_ratio: Option<f64>,

        /// Output directory for report.json and trades.csv.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,
    },
    /// Backtest several target ratios over the same candles.
    Sweep {
        #[command(flatten)]
        data: DataArgs,

        /// Target ratios, comma separated. Defaults to sweep.target_ratios.
        #[arg(long, value_delimiter = ',')]
        ratios: Option<Vec<f64>>,

        /// Output directory for the sweep JSON.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,
    },
    /// Print price change, volume and volatility for the latest candle.
    Stats {
        #[command(flatten)]
        data: DataArgs,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            data,
            target_ratio,
            output_dir,
        } => run_cmd(&data, target_ratio, output_dir),
        Commands::Sweep {
            data,
            ratios,
            output_dir,
        } => sweep_cmd(&data, ratios, output_dir),
        Commands::Stats { data } => stats_cmd(&data),
    }
}

fn run_cmd(args: &DataArgs, target_ratio: Option<f64>, output_dir: PathBuf) -> Result<()> {
    let mut config = args.resolve()?;
    if let Some(ratio) = target_ratio {
        config.strategy.target_ratio = ratio;
    }
    config.validate()?;

    let loaded = load_data(&config.data)?;
    let report = run_pipeline(&loaded, &config.strategy)?;
    print!("{}", render_run_summary(&report));

    let manager = ArtifactManager::new(&output_dir)?;
    let paths = manager.save_run(&report)?;
    println!("Artifacts saved to: {}", paths.run_dir.display());
    Ok(())
}

fn sweep_cmd(args: &DataArgs, ratios: Option<Vec<f64>>, output_dir: PathBuf) -> Result<()> {
    let mut config = args.resolve()?;
    if let Some(ratios) = ratios {
        config.sweep.target_ratios = ratios;
    }
    config.validate()?;

    let loaded = load_data(&config.data)?;
    let sweep = run_sweep(&loaded, &config.strategy, &config.sweep.target_ratios)?;
    print!("{}", render_sweep_table(&sweep));

    let manager = ArtifactManager::new(&output_dir)?;
    let path = manager.save_sweep(&sweep)?;
    println!("Sweep saved to: {}", path.display());
    Ok(())
}

fn stats_cmd(args: &DataArgs) -> Result<()> {
    let config = args.resolve()?;
    let loaded = load_data(&config.data)?;
    let Some(snapshot) = MarketSnapshot::latest(&loaded.candles) else {
        bail!("no candles to summarise");
    };
    print_snapshot(&snapshot, loaded.has_synthetic);
    Ok(())
}

fn print_snapshot(s: &MarketSnapshot, synthetic: bool) {
    if synthetic {
        println!("** SYNTHETIC DATA **");
    }
    println!("=== {} UTC ===", format_timestamp(s.time));
    println!("  Close:        {:.4}", s.close);
    println!("  Change 1h:    {}", pct(s.change_1h));
    println!("  Change 24h:   {}", pct(s.change_24h));
    println!("  Change 7d:    {}", pct(s.change_7d));
    println!("  Volume 24h:   {}", num(s.volume_24h));
    println!("  Std 1h:       {}", num(s.std_1h));
}

fn pct(value: f64) -> String {
    if value.is_finite() {
        format!("{:+.2}%", value * 100.0)
    } else {
        "n/a".to_string()
    }
}

fn num(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.4}")
    } else {
        "n/a".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    fn data_args(cli: Cli) -> DataArgs {
        match cli.command {
            Commands::Run { data, .. } | Commands::Sweep { data, .. } | Commands::Stats { data } => {
                data
            }
        }
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn data_flag_overrides_synthetic_from_config() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[data]\nsynthetic_rows = 500\n").unwrap();
        let config_path = file.path().to_str().unwrap().to_string();

        let cli = Cli::try_parse_from([
            "fractalab",
            "stats",
            "--config",
            config_path.as_str(),
            "--data",
            "BTC_1.feather",
        ])
        .unwrap();
        let config = data_args(cli).resolve().unwrap();
        assert_eq!(config.data.path, Some(PathBuf::from("BTC_1.feather")));
        assert_eq!(config.data.synthetic_rows, None);
    }

    #[test]
    fn data_and_synthetic_flags_conflict() {
        let parsed = Cli::try_parse_from([
            "fractalab",
            "run",
            "--data",
            "BTC_1.feather",
            "--synthetic",
            "100",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn missing_source_is_an_error() {
        let cli = Cli::try_parse_from(["fractalab", "stats"]).unwrap();
        assert!(data_args(cli).resolve().is_err());
    }
}
