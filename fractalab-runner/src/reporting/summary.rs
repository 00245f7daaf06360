//! Plain-text summaries for the terminal.

use chrono::DateTime;
use std::fmt::Write;

use fractalab_core::domain::TimestampMs;

use crate::runner::{short_id, RunReport};
use crate::sweep::SweepResults;

/// `YYYY-MM-DD HH:MM` in UTC, or the raw millis if out of range.
pub fn format_timestamp(time: TimestampMs) -> String {
    DateTime::from_timestamp_millis(time)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| time.to_string())
}

fn format_duration(ms: f64) -> String {
    let minutes = ms / 60_000.0;
    if minutes < 120.0 {
        format!("{minutes:.1} min")
    } else {
        format!("{:.1} h", minutes / 60.0)
    }
}

fn format_range(first: Option<TimestampMs>, last: Option<TimestampMs>) -> String {
    match (first, last) {
        (Some(first), Some(last)) => {
            format!("{} .. {}", format_timestamp(first), format_timestamp(last))
        }
        _ => "(empty)".to_string(),
    }
}

pub fn render_run_summary(report: &RunReport) -> String {
    let r = &report.result;
    let s = &report.strategy;
    let mut out = String::new();

    let _ = writeln!(out, "=== Run {} ===", short_id(&report.run_id));
    if report.has_synthetic {
        let _ = writeln!(out, "  ** SYNTHETIC DATA **");
    }
    let _ = writeln!(
        out,
        "  Candles:      {} ({})",
        report.candle_count,
        format_range(report.first_time, report.last_time)
    );
    let _ = writeln!(
        out,
        "  Strategy:     EMA {}/{}/{}, target ratio {:.2}, warm-up {}",
        s.ema_fast, s.ema_mid, s.ema_slow, s.target_ratio, s.warmup_rows
    );
    if report.insufficient_data {
        let _ = writeln!(
            out,
            "  Not enough candles: need at least {}",
            s.fractal().min_rows()
        );
        return out;
    }

    let st = &report.scan_stats;
    let _ = writeln!(
        out,
        "  Signals:      {} (fast/mid entries {}, mid/slow entries {})",
        report.signals.len(),
        st.fast_mid_entries,
        st.mid_slow_entries
    );
    let _ = writeln!(
        out,
        "  Exits:        {} take-profit, {} stop-loss{}",
        st.take_profit_exits,
        st.stop_loss_exits,
        if st.discarded_trailing_entry {
            ", trailing entry dropped"
        } else {
            ""
        }
    );
    let _ = writeln!(
        out,
        "  Trades:       {} ({} wins, win rate {:.1}%)",
        r.num_trades,
        r.num_wins,
        r.win_rate * 100.0
    );
    let _ = writeln!(
        out,
        "  Portfolio:    {:.2} -> {:.2} ({:+.2}%)",
        r.start_portfolio_value,
        r.end_portfolio_value,
        r.percentage_gain * 100.0
    );
    let _ = writeln!(
        out,
        "  Avg trade:    {:+.4} ({:+.3}%), held {}",
        r.avg_gain_loss_per_trade,
        r.avg_perc_gain_per_trade * 100.0,
        format_duration(r.avg_holding_time)
    );
    out
}

pub fn render_sweep_table(sweep: &SweepResults) -> String {
    let mut out = String::new();
    if sweep.has_synthetic {
        let _ = writeln!(out, "** SYNTHETIC DATA **");
    }
    if sweep.insufficient_data {
        let _ = writeln!(out, "Not enough candles for the configured warm-up");
        return out;
    }
    let _ = writeln!(
        out,
        "{:>4}  {:>6}  {:>7}  {:>6}  {:>8}  {:>10}  {:>8}",
        "rank", "ratio", "signals", "trades", "win %", "end value", "gain %"
    );
    for (rank, entry) in sweep.entries.iter().enumerate() {
        let r = &entry.result;
        let _ = writeln!(
            out,
            "{:>4}  {:>6.2}  {:>7}  {:>6}  {:>8.1}  {:>10.2}  {:>+8.2}",
            rank + 1,
            entry.target_ratio,
            entry.signal_count,
            r.num_trades,
            r.win_rate * 100.0,
            r.end_portfolio_value,
            r.percentage_gain * 100.0
        );
    }
    out
}
