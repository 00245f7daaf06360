//! Integration tests for candle loading from columnar files.

use fractalab_core::data::{detect_anomalies, load_candles, DataError};
use polars::prelude::*;
use std::fs::File;

/// Minute candles written the way the upstream exporter does: capitalised
/// column names, epoch-millisecond times, unsorted with one duplicate.
fn exported_frame() -> DataFrame {
    df!(
        "Time" => &[120_000i64, 0, 60_000, 60_000],
        "Open" => &[3.0, 1.0, 2.0, 8.0],
        "High" => &[4.0, 2.0, 3.0, 9.0],
        "Low" => &[2.5, 0.5, 1.5, 7.0],
        "Close" => &[3.5, 1.5, 2.5, 8.5],
        "Volume" => &[7.0, 5.0, 6.0, 1.0],
    )
    .unwrap()
}

#[test]
fn loads_feather_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("BTC_1.feather");
    let mut df = exported_frame();
    IpcWriter::new(File::create(&path).unwrap())
        .finish(&mut df)
        .unwrap();

    let candles = load_candles(&path).unwrap();
    let times: Vec<i64> = candles.iter().map(|c| c.time).collect();
    assert_eq!(times, vec![0, 60_000, 120_000]);
    assert_eq!(candles[1].close, 2.5);
    assert!(detect_anomalies(&candles).is_empty());
}

#[test]
fn loads_parquet_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("candles.parquet");
    let mut df = exported_frame();
    ParquetWriter::new(File::create(&path).unwrap())
        .finish(&mut df)
        .unwrap();

    let candles = load_candles(&path).unwrap();
    assert_eq!(candles.len(), 3);
    assert_eq!(candles[2].volume, 7.0);
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("candles.txt");
    std::fs::write(&path, "time\n0\n").unwrap();
    assert!(matches!(
        load_candles(&path),
        Err(DataError::UnsupportedFormat(_))
    ));
}
