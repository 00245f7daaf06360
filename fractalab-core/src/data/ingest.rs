//! Read OHLCV tables from Parquet, Arrow IPC/Feather or CSV into candles.
//!
//! Column names are matched case-insensitively, so `Time,Open,...` exports
//! load the same as `time,open,...`.

use polars::prelude::*;
use std::path::Path;

use super::canonicalize::Canonicalizer;
use crate::domain::Candle;

pub const REQUIRED_COLUMNS: [&str; 6] = ["time", "open", "high", "low", "close", "volume"];

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("missing required column: {0}")]
    MissingColumn(String),

    #[error("null value in column '{column}' at row {row}")]
    NullValue { column: &'static str, row: usize },

    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Parquet,
    Ipc,
    Csv,
}

impl FileFormat {
    /// Detect the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, DataError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "parquet" => Ok(Self::Parquet),
            "feather" | "arrow" | "ipc" => Ok(Self::Ipc),
            "csv" => Ok(Self::Csv),
            _ => Err(DataError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn scan(self, path: &Path) -> Result<LazyFrame, DataError> {
        let lf = match self {
            Self::Parquet => LazyFrame::scan_parquet(path, Default::default())?,
            Self::Ipc => LazyFrame::scan_ipc(path, Default::default())?,
            Self::Csv => LazyCsvReader::new(path).with_has_header(true).finish()?,
        };
        Ok(lf)
    }
}

/// Load, sort and dedupe candles from a file.
pub fn load_candles(path: &Path) -> Result<Vec<Candle>, DataError> {
    let df = FileFormat::from_path(path)?.scan(path)?.collect()?;
    let df = normalize_columns(df)?;
    let df = Canonicalizer::canonicalize(df.lazy()).collect()?;
    frame_to_candles(&df)
}

/// Match required columns case-insensitively and cast them to the canonical
/// names and types. An exact-case match wins over a case-insensitive one.
fn normalize_columns(df: DataFrame) -> Result<DataFrame, DataError> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    let mut exprs = Vec::with_capacity(REQUIRED_COLUMNS.len());
    for column in REQUIRED_COLUMNS {
        let actual = resolve_column(&names, column)
            .ok_or_else(|| DataError::MissingColumn(column.to_string()))?;
        let dtype = if column == "time" {
            DataType::Int64
        } else {
            DataType::Float64
        };
        exprs.push(col(actual).cast(dtype).alias(column));
    }

    Ok(df.lazy().select(exprs).collect()?)
}

fn resolve_column<'a>(names: &'a [String], wanted: &str) -> Option<&'a str> {
    names
        .iter()
        .find(|name| name.as_str() == wanted)
        .or_else(|| names.iter().find(|name| name.eq_ignore_ascii_case(wanted)))
        .map(String::as_str)
}

fn frame_to_candles(df: &DataFrame) -> Result<Vec<Candle>, DataError> {
    let time = df.column("time")?.i64()?;
    let open = df.column("open")?.f64()?;
    let high = df.column("high")?.f64()?;
    let low = df.column("low")?.f64()?;
    let close = df.column("close")?.f64()?;
    let volume = df.column("volume")?.f64()?;

    (0..df.height())
        .map(|row| {
            Ok(Candle {
                time: non_null(time.get(row), "time", row)?,
                open: non_null(open.get(row), "open", row)?,
                high: non_null(high.get(row), "high", row)?,
                low: non_null(low.get(row), "low", row)?,
                close: non_null(close.get(row), "close", row)?,
                volume: non_null(volume.get(row), "volume", row)?,
            })
        })
        .collect()
}

fn non_null<T>(value: Option<T>, column: &'static str, row: usize) -> Result<T, DataError> {
    value.ok_or(DataError::NullValue { column, row })
}
