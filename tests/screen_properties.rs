//! Property-based tests for the screening engine.
//!
//! These pin the engine's contract: filter output is exactly the subset of
//! records satisfying the predicate conjunction, scores stay within 0-100,
//! repeated runs are bit-identical, and ranking is stable.

use proptest::prelude::*;

use moverscan::domain::market::MarketRecord;
use moverscan::domain::screen::{
    ScoreCriterion, ScoreProfile, ScreenConfig, ScreenMode, ScreeningEngine, WeightedCriterion,
};

fn arb_record() -> impl Strategy<Value = MarketRecord> {
    (
        "[A-Z]{1,5}",
        0.0f64..200.0,
        -100.0f64..300.0,
        0.0f64..10_000_000.0,
        prop_oneof![Just(0.0f64), 1.0f64..1_000_000.0],
        prop_oneof![Just(0.0f64), 1.0f64..100_000_000.0],
    )
        .prop_map(|(symbol, price, change, volume, reference, float)| {
            MarketRecord::new(symbol, price, change, volume, reference, float)
        })
}

fn arb_screen_config() -> impl Strategy<Value = ScreenConfig> {
    (
        0.0f64..20.0,
        0.0f64..100.0,
        0.0f64..50.0,
        0.0f64..100.0,
        0.0f64..50_000_000.0,
        any::<bool>(),
    )
        .prop_map(|(ratio, change, p1, p2, float, unknown_pass)| {
            let (price_min, price_max) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };
            ScreenConfig::new(ratio, change, price_min, price_max, float, unknown_pass)
                .expect("generated config must be structurally valid")
        })
}

fn arb_score_profile() -> impl Strategy<Value = ScoreProfile> {
    (
        0.01f64..1.0,
        0.01f64..1.0,
        0.01f64..1.0,
        0.01f64..1.0,
        1.0f64..100.0,
        1.0f64..20.0,
        1.0f64..10_000_000.0,
    )
        .prop_map(|(w1, w2, w3, w4, change_target, ratio_target, volume_target)| {
            let sum = w1 + w2 + w3 + w4;
            ScoreProfile::new(
                vec![
                    WeightedCriterion::new(
                        ScoreCriterion::ChangePercent {
                            target: change_target,
                        },
                        w1 / sum,
                    ),
                    WeightedCriterion::new(
                        ScoreCriterion::VolumeRatio {
                            target: ratio_target,
                        },
                        w2 / sum,
                    ),
                    WeightedCriterion::new(
                        ScoreCriterion::Volume {
                            target: volume_target,
                        },
                        w3 / sum,
                    ),
                    WeightedCriterion::new(
                        ScoreCriterion::PriceInRange {
                            min: 3.0,
                            max: 20.0,
                        },
                        w4 / sum,
                    ),
                ],
                true,
            )
            .expect("normalized weights must validate")
        })
}

proptest! {
    #[test]
    fn filter_output_is_exactly_the_passing_subset(
        records in prop::collection::vec(arb_record(), 0..40),
        config in arb_screen_config(),
    ) {
        let engine = ScreeningEngine::new(ScreenMode::Filter(config.clone()));
        let output = engine.screen(&records);

        // Every output record came from the input and passes independently
        for scored in &output {
            prop_assert!(records.contains(&scored.record));
            prop_assert!(config.record_passes(&scored.record));
            prop_assert_eq!(scored.volume_ratio, scored.record.volume_ratio());
        }

        // Every passing input record appears, in input order
        let expected: Vec<&MarketRecord> =
            records.iter().filter(|r| config.record_passes(r)).collect();
        prop_assert_eq!(output.len(), expected.len());
        for (scored, record) in output.iter().zip(expected) {
            prop_assert_eq!(&scored.record, record);
        }
    }

    #[test]
    fn zero_reference_volume_never_panics(
        symbol in "[A-Z]{1,5}",
        price in 0.0f64..100.0,
        volume in 0.0f64..10_000_000.0,
    ) {
        let record = MarketRecord::new(symbol, price, 0.0, volume, 0.0, 0.0);
        prop_assert_eq!(record.volume_ratio(), 0.0);
    }

    #[test]
    fn match_percent_is_bounded(
        records in prop::collection::vec(arb_record(), 0..40),
        profile in arb_score_profile(),
    ) {
        let engine = ScreeningEngine::new(ScreenMode::Score(profile));
        for scored in engine.screen(&records) {
            let pct = scored.match_percent.expect("score mode always annotates");
            prop_assert!((0.0..=100.0).contains(&pct), "match_percent out of range: {}", pct);
        }
    }

    #[test]
    fn screening_is_idempotent(
        records in prop::collection::vec(arb_record(), 0..40),
        config in arb_screen_config(),
        profile in arb_score_profile(),
    ) {
        let filter = ScreeningEngine::new(ScreenMode::Filter(config));
        prop_assert_eq!(filter.screen(&records), filter.screen(&records));

        let score = ScreeningEngine::new(ScreenMode::Score(profile));
        prop_assert_eq!(
            score.screen_ranked(&records, Some(10)),
            score.screen_ranked(&records, Some(10))
        );
    }

    #[test]
    fn ranking_is_a_stable_descending_permutation(
        records in prop::collection::vec(arb_record(), 0..40),
        profile in arb_score_profile(),
    ) {
        let engine = ScreeningEngine::new(ScreenMode::Score(profile));
        let unranked = engine.screen(&records);
        let ranked = engine.screen_ranked(&records, None);

        prop_assert_eq!(ranked.len(), unranked.len());

        // Non-increasing scores
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].score() >= pair[1].score());
        }

        // Stability: ties keep their input order. The unranked output is in
        // input order, so filtering it to one tied score must match the
        // ranked slice with that score.
        for scored in &ranked {
            let tied_ranked: Vec<_> = ranked
                .iter()
                .filter(|r| r.score() == scored.score())
                .collect();
            let tied_input: Vec<_> = unranked
                .iter()
                .filter(|r| r.score() == scored.score())
                .collect();
            prop_assert_eq!(tied_ranked, tied_input);
        }
    }
}
