//! Candle table loading and canonicalisation.

pub mod canonicalize;
pub mod ingest;

pub use canonicalize::{detect_anomalies, AnomalyReport, AnomalyType, Canonicalizer};
pub use ingest::{load_candles, DataError, FileFormat, REQUIRED_COLUMNS};
