use polars::prelude::*;

use crate::domain::{Candle, MINUTE_MS};

/// Canonicalizer for candle tables
pub struct Canonicalizer;

impl Canonicalizer {
    /// Sort by time and drop repeated timestamps, keeping the first row.
    pub fn canonicalize(df: LazyFrame) -> LazyFrame {
        df.sort(
            ["time"],
            SortMultipleOptions::default().with_maintain_order(true),
        )
        .unique_stable(Some(vec!["time".into()]), UniqueKeepStrategy::First)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnomalyReport {
    pub anomaly_type: AnomalyType,
    pub count: usize,
    /// Row index of the first occurrence.
    pub first_row: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnomalyType {
    /// OHLC values inconsistent with each other, non-positive prices or NaN.
    InsaneCandle,
    /// Spacing to the previous candle is not exactly one minute.
    IrregularSpacing,
}

/// Detect data quality problems in canonical (sorted, deduped) candles.
///
/// Anomalies are informational; the strategy still runs on the data.
pub fn detect_anomalies(candles: &[Candle]) -> Vec<AnomalyReport> {
    let mut insane: Option<AnomalyReport> = None;
    let mut gaps: Option<AnomalyReport> = None;

    for (row, candle) in candles.iter().enumerate() {
        if !candle.is_sane() {
            note(&mut insane, AnomalyType::InsaneCandle, row);
        }
        if row > 0 && candle.time - candles[row - 1].time != MINUTE_MS {
            note(&mut gaps, AnomalyType::IrregularSpacing, row);
        }
    }

    insane.into_iter().chain(gaps).collect()
}

fn note(slot: &mut Option<AnomalyReport>, anomaly_type: AnomalyType, row: usize) {
    slot.get_or_insert(AnomalyReport {
        anomaly_type,
        count: 0,
        first_row: row,
    })
    .count += 1;
}
