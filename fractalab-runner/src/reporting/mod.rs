//! Reporting: terminal summaries and on-disk run artifacts.

pub mod artifacts;
pub mod summary;
mod trades;

pub use artifacts::{ArtifactManager, ArtifactPaths};
pub use summary::{format_timestamp, render_run_summary, render_sweep_table};
pub use trades::TradeRow;
