//! Property checks for the calculator, the zone breakdown, and the what-if simulator.

use burnout_radar::workflows::burnout::breakdown::zone_magnitudes;
use burnout_radar::workflows::burnout::{
    compute_score, simulate, simulate_sleep_increase, Perturbation, RawInputs, RiskCategory,
};
use proptest::prelude::*;

fn in_range_inputs() -> impl Strategy<Value = RawInputs> {
    (0.0f64..=12.0, 0.0f64..=16.0, 0i32..=10, 1i32..=5).prop_map(
        |(sleep, screen, tasks, mood)| RawInputs::new(sleep, screen, tasks, mood),
    )
}

fn any_finite_inputs() -> impl Strategy<Value = RawInputs> {
    (-50.0f64..50.0, -50.0f64..50.0, -100i32..100, -20i32..20).prop_map(
        |(sleep, screen, tasks, mood)| RawInputs::new(sleep, screen, tasks, mood),
    )
}

fn perturbation() -> impl Strategy<Value = Perturbation> {
    prop_oneof![
        (-4.0f64..4.0).prop_map(Perturbation::AddSleepHours),
        (-6.0f64..6.0).prop_map(Perturbation::AddScreenHours),
        (-5i32..5).prop_map(Perturbation::AddTasks),
        (-3i32..3).prop_map(Perturbation::AddMood),
    ]
}

proptest! {
    #[test]
    fn sub_scores_stay_in_unit_range(raw in any_finite_inputs()) {
        let assessment = compute_score(&raw);
        let sub = assessment.sub_scores;
        for value in [sub.sleep, sub.screen, sub.tasks, sub.mood] {
            prop_assert!((0.0..=1.0).contains(&value));
        }
        prop_assert!(assessment.score <= 100);
        prop_assert_eq!(assessment.category, RiskCategory::from_score(assessment.score));
    }

    #[test]
    fn more_sleep_never_raises_the_score(raw in in_range_inputs(), extra in 0.0f64..4.0) {
        let mut rested = raw;
        rested.sleep_hours += extra;
        prop_assert!(compute_score(&rested).score <= compute_score(&raw).score);
    }

    #[test]
    fn more_screen_time_never_lowers_the_score(raw in in_range_inputs(), extra in 0.0f64..6.0) {
        let mut strained = raw;
        strained.screen_hours += extra;
        prop_assert!(compute_score(&strained).score >= compute_score(&raw).score);
    }

    #[test]
    fn more_tasks_never_lower_the_score(raw in in_range_inputs(), extra in 0i32..5) {
        let mut busier = raw;
        busier.task_count += extra;
        prop_assert!(compute_score(&busier).score >= compute_score(&raw).score);
    }

    #[test]
    fn better_mood_never_raises_the_score(raw in in_range_inputs(), steps in 0i32..4) {
        let mut brighter = raw;
        brighter.mood += steps;
        prop_assert!(compute_score(&brighter).score <= compute_score(&raw).score);
    }

    #[test]
    fn simulation_matches_a_full_rescore(raw in any_finite_inputs(), change in perturbation()) {
        let assessment = compute_score(&raw);
        let simulated = simulate(&raw, &assessment.sub_scores, change);
        prop_assert_eq!(simulated, compute_score(&change.apply(&raw)).score);
    }

    #[test]
    fn extra_sleep_what_if_caps_at_eight_hours(raw in any_finite_inputs()) {
        let assessment = compute_score(&raw);
        let rested = RawInputs {
            sleep_hours: (raw.clamped().sleep_hours + 1.0).min(8.0),
            ..raw
        };
        prop_assert_eq!(
            simulate_sleep_increase(&raw, &assessment.sub_scores),
            compute_score(&rested).score
        );
    }

    #[test]
    fn zone_magnitudes_always_total_one_hundred(score in 0u8..=100) {
        let total: u32 = zone_magnitudes(score)
            .iter()
            .map(|share| u32::from(share.magnitude))
            .sum();
        prop_assert_eq!(total, 100);
    }
}
