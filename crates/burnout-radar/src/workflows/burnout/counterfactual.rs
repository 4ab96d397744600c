//! What-if recomputation of the composite score under a single-input change.
//!
//! Only the perturbed driver is renormalized; the remaining sub-scores are reused as given,
//! then recombined through [`scoring::composite_score`]. Feeding the perturbed inputs through
//! [`scoring::compute_score`] yields the same score.

use serde::{Deserialize, Serialize};

use super::domain::{RawInputs, SubScores};
use super::scoring::{self, SLEEP_TARGET_HOURS};

/// A hypothetical change to exactly one raw input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "input", content = "delta", rename_all = "snake_case")]
pub enum Perturbation {
    /// Extra sleep, never pushed past the point where sleep stops carrying risk.
    AddSleepHours(f64),
    AddScreenHours(f64),
    AddTasks(i32),
    AddMood(i32),
}

impl Perturbation {
    pub const ONE_MORE_HOUR_OF_SLEEP: Self = Self::AddSleepHours(1.0);

    /// The inputs after applying the change, clamped into their domain.
    pub fn apply(&self, raw: &RawInputs) -> RawInputs {
        let mut inputs = raw.clamped();
        match *self {
            Self::AddSleepHours(hours) => {
                inputs.sleep_hours = (inputs.sleep_hours + hours).min(SLEEP_TARGET_HOURS);
            }
            Self::AddScreenHours(hours) => inputs.screen_hours += hours,
            Self::AddTasks(count) => inputs.task_count = inputs.task_count.saturating_add(count),
            Self::AddMood(steps) => inputs.mood = inputs.mood.saturating_add(steps),
        }
        inputs.clamped()
    }
}

/// Score the day would have had under `perturbation`, holding the other drivers fixed.
pub fn simulate(raw: &RawInputs, sub_scores: &SubScores, perturbation: Perturbation) -> u8 {
    let perturbed = perturbation.apply(raw);
    let mut adjusted = *sub_scores;

    match perturbation {
        Perturbation::AddSleepHours(_) => {
            adjusted.sleep = scoring::sleep_score(perturbed.sleep_hours);
        }
        Perturbation::AddScreenHours(_) => {
            adjusted.screen = scoring::screen_score(perturbed.screen_hours);
        }
        Perturbation::AddTasks(_) => adjusted.tasks = scoring::task_score(perturbed.task_count),
        Perturbation::AddMood(_) => adjusted.mood = scoring::mood_score(perturbed.mood),
    }

    scoring::composite_score(&adjusted)
}

/// Score with one more hour of sleep, capped at the sleep target.
pub fn simulate_sleep_increase(raw: &RawInputs, sub_scores: &SubScores) -> u8 {
    simulate(raw, sub_scores, Perturbation::ONE_MORE_HOUR_OF_SLEEP)
}
