//! Property tests over seeded synthetic data and sweep ranking.

use fractalab_core::domain::STARTING_VALUE;
use fractalab_runner::{
    compute_dataset_hash, generate_synthetic_candles, run_pipeline, run_sweep, LoadedData,
    StrategyConfig,
};
use proptest::prelude::*;

fn strategy_for(ratio: f64, warmup: usize) -> StrategyConfig {
    StrategyConfig {
        target_ratio: ratio,
        warmup_rows: warmup,
        ..StrategyConfig::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn pipeline_invariants_hold_for_any_seed(
        seed in any::<u64>(),
        rows in 150usize..1_500,
        ratio in 0.0f64..4.0,
        warmup in 100usize..140,
    ) {
        let loaded = LoadedData::from_candles(generate_synthetic_candles(rows, seed), true);
        let strategy = strategy_for(ratio, warmup);
        let report = run_pipeline(&loaded, &strategy).unwrap();

        prop_assert_eq!(report.insufficient_data, rows < warmup + 2);
        prop_assert_eq!(report.signals.len(), report.result.num_trades * 2);
        prop_assert!(report.result.num_wins <= report.result.num_trades);
        prop_assert!((0.0..=1.0).contains(&report.result.win_rate));
        prop_assert_eq!(report.result.start_portfolio_value, STARTING_VALUE);
        prop_assert!(report.result.end_portfolio_value > 0.0);
        for pair in report.signals.chunks(2) {
            prop_assert!(pair[0].is_buy());
            prop_assert!(!pair[1].is_buy());
            prop_assert!(pair[0].time < pair[1].time);
        }
        prop_assert!(report.result.sell_times.iter().all(|&t| t <= loaded.candles[rows - 1].time));
    }

    #[test]
    fn dataset_hash_tracks_content(seed in any::<u64>(), rows in 1usize..300, bump in 0usize..300) {
        let candles = generate_synthetic_candles(rows, seed);
        let mut changed = candles.clone();
        let idx = bump % rows;
        changed[idx].volume += 1.0;
        prop_assert_ne!(compute_dataset_hash(&candles), compute_dataset_hash(&changed));
    }

    #[test]
    fn sweep_is_ranked(seed in any::<u64>(), ratios in prop::collection::vec(0.0f64..4.0, 1..6)) {
        let loaded = LoadedData::from_candles(generate_synthetic_candles(800, seed), true);
        let sweep = run_sweep(&loaded, &StrategyConfig::default(), &ratios).unwrap();
        prop_assert_eq!(sweep.entries.len(), ratios.len());
        for w in sweep.entries.windows(2) {
            let (a, b) = (&w[0], &w[1]);
            prop_assert!(
                a.result.end_portfolio_value > b.result.end_portfolio_value
                    || (a.result.end_portfolio_value == b.result.end_portfolio_value
                        && a.target_ratio <= b.target_ratio)
            );
        }
    }
}
