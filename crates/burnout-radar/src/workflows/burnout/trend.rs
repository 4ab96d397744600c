use serde::Serialize;

use super::domain::HistorySeries;

/// Minimum number of stored days before a projection is offered.
pub const MIN_TREND_RECORDS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Rising,
    Falling,
    Steady,
}

impl TrendDirection {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rising => "Rising",
            Self::Falling => "Falling",
            Self::Steady => "Steady",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendSummary {
    pub mean_delta: f64,
    pub direction: TrendDirection,
    pub projected_next: u8,
}

/// Mean of successive score differences, or `None` below [`MIN_TREND_RECORDS`].
pub fn mean_delta(history: &HistorySeries) -> Option<f64> {
    if history.len() < MIN_TREND_RECORDS {
        return None;
    }

    let scores = history.scores();
    let total: f64 = scores
        .windows(2)
        .map(|pair| f64::from(pair[1]) - f64::from(pair[0]))
        .sum();

    Some(total / (scores.len() - 1) as f64)
}

/// Project tomorrow's score as `current_score` plus the mean historical delta.
pub fn project_next(history: &HistorySeries, current_score: u8) -> Option<u8> {
    mean_delta(history).map(|trend| apply_trend(current_score, trend))
}

pub fn summarize(history: &HistorySeries, current_score: u8) -> Option<TrendSummary> {
    let mean_delta = mean_delta(history)?;
    let direction = if mean_delta > 0.0 {
        TrendDirection::Rising
    } else if mean_delta < 0.0 {
        TrendDirection::Falling
    } else {
        TrendDirection::Steady
    };

    Some(TrendSummary {
        mean_delta,
        direction,
        projected_next: apply_trend(current_score, mean_delta),
    })
}

fn apply_trend(current_score: u8, trend: f64) -> u8 {
    (f64::from(current_score) + trend).clamp(0.0, 100.0) as u8
}
