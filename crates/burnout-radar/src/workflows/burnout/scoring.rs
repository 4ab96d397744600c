//! Score calculator: raw inputs to normalized sub-scores, a weighted composite, and a category.
//!
//! Only the exponentiated-penalty formula is supported. Sleep and screen time are raised to
//! convexity exponents before weighting so that extreme values dominate the composite.

use super::domain::{Assessment, RawInputs, RiskCategory, SubScores};

pub const SLEEP_TARGET_HOURS: f64 = 8.0;
pub const SCREEN_SATURATION_HOURS: f64 = 10.0;
pub const TASK_SATURATION: f64 = 8.0;

pub const SLEEP_EXPONENT: f64 = 1.5;
pub const SCREEN_EXPONENT: f64 = 1.3;

pub const SLEEP_WEIGHT: f64 = 0.35;
pub const SCREEN_WEIGHT: f64 = 0.25;
pub const TASK_WEIGHT: f64 = 0.25;
pub const MOOD_WEIGHT: f64 = 0.15;

/// Score a day's inputs. Inputs are clamped into their domain before use.
pub fn compute_score(raw: &RawInputs) -> Assessment {
    let inputs = raw.clamped();
    let sub_scores = normalize(&inputs);
    let score = composite_score(&sub_scores);

    Assessment {
        inputs,
        sub_scores,
        score,
        category: RiskCategory::from_score(score),
    }
}

pub fn normalize(inputs: &RawInputs) -> SubScores {
    SubScores {
        sleep: sleep_score(inputs.sleep_hours),
        screen: screen_score(inputs.screen_hours),
        tasks: task_score(inputs.task_count),
        mood: mood_score(inputs.mood),
    }
}

pub fn sleep_score(sleep_hours: f64) -> f64 {
    unit(((SLEEP_TARGET_HOURS - sleep_hours) / SLEEP_TARGET_HOURS).max(0.0))
}

pub fn screen_score(screen_hours: f64) -> f64 {
    unit((screen_hours / SCREEN_SATURATION_HOURS).min(1.0))
}

pub fn task_score(task_count: i32) -> f64 {
    unit((f64::from(task_count) / TASK_SATURATION).min(1.0))
}

pub fn mood_score(mood: i32) -> f64 {
    unit(f64::from(5 - mood) / 4.0)
}

pub fn sleep_penalty(sleep: f64) -> f64 {
    sleep.powf(SLEEP_EXPONENT)
}

pub fn screen_penalty(screen: f64) -> f64 {
    screen.powf(SCREEN_EXPONENT)
}

/// Weighted sum of penalties scaled to an integer in `[0, 100]`.
pub fn composite_score(sub_scores: &SubScores) -> u8 {
    let sleep = unit(sub_scores.sleep);
    let screen = unit(sub_scores.screen);

    let raw = SLEEP_WEIGHT * sleep_penalty(sleep)
        + SCREEN_WEIGHT * screen_penalty(screen)
        + TASK_WEIGHT * unit(sub_scores.tasks)
        + MOOD_WEIGHT * unit(sub_scores.mood);

    (raw * 100.0).clamp(0.0, 100.0) as u8
}

fn unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}
