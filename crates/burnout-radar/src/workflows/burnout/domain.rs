use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const SLEEP_HOURS_MAX: f64 = 12.0;
pub const SCREEN_HOURS_MAX: f64 = 16.0;
pub const TASK_COUNT_MAX: i32 = 10;
pub const MOOD_MIN: i32 = 1;
pub const MOOD_MAX: i32 = 5;

/// Self-reported inputs for a single day, as collected from the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawInputs {
    pub sleep_hours: f64,
    pub screen_hours: f64,
    pub task_count: i32,
    pub mood: i32,
}

impl RawInputs {
    pub fn new(sleep_hours: f64, screen_hours: f64, task_count: i32, mood: i32) -> Self {
        Self {
            sleep_hours,
            screen_hours,
            task_count,
            mood,
        }
    }

    /// Copy of the inputs with every field forced into its declared domain.
    pub fn clamped(&self) -> Self {
        Self {
            sleep_hours: clamp_hours(self.sleep_hours, SLEEP_HOURS_MAX),
            screen_hours: clamp_hours(self.screen_hours, SCREEN_HOURS_MAX),
            task_count: self.task_count.clamp(0, TASK_COUNT_MAX),
            mood: self.mood.clamp(MOOD_MIN, MOOD_MAX),
        }
    }
}

impl Default for RawInputs {
    fn default() -> Self {
        Self::new(7.0, 6.0, 3, 3)
    }
}

fn clamp_hours(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, max)
}

/// Each risk driver normalized to `[0, 1]`, higher meaning more risk.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SubScores {
    pub sleep: f64,
    pub screen: f64,
    pub tasks: f64,
    pub mood: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    Low,
    Moderate,
    High,
}

impl RiskCategory {
    pub const MODERATE_FLOOR: u8 = 35;
    pub const HIGH_FLOOR: u8 = 70;

    pub const fn from_score(score: u8) -> Self {
        if score < Self::MODERATE_FLOOR {
            Self::Low
        } else if score < Self::HIGH_FLOOR {
            Self::Moderate
        } else {
            Self::High
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Output of one scoring run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub inputs: RawInputs,
    pub sub_scores: SubScores,
    pub score: u8,
    pub category: RiskCategory,
}

/// Lowercased identifier scoping every stored record to one user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Normalize an identifier supplied by the identity collaborator.
    pub fn parse(raw: Option<&str>) -> Result<Self, IdentityError> {
        let value = raw.map(str::trim).unwrap_or_default();
        if value.is_empty() {
            return Err(IdentityError::Missing);
        }
        // Identifiers double as mirror file names.
        let path_like = value.contains(['/', '\\']) || value.contains("..");
        if path_like || value.chars().any(char::is_control) {
            return Err(IdentityError::Invalid(value.to_string()));
        }
        Ok(Self(value.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("not logged in: a user identifier is required")]
    Missing,
    #[error("user identifier '{0}' contains path separators, '..', or control characters")]
    Invalid(String),
}

/// Stored result for one (user, day).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurnoutRecord {
    pub user_id: UserId,
    pub date: NaiveDate,
    pub sleep_hours: f64,
    pub screen_hours: f64,
    pub task_count: i32,
    pub mood: i32,
    pub score: u8,
    pub category: RiskCategory,
    pub saved_at: DateTime<Utc>,
}

impl BurnoutRecord {
    pub fn from_assessment(
        user_id: UserId,
        date: NaiveDate,
        assessment: &Assessment,
        saved_at: DateTime<Utc>,
    ) -> Self {
        let inputs = assessment.inputs;
        Self {
            user_id,
            date,
            sleep_hours: inputs.sleep_hours,
            screen_hours: inputs.screen_hours,
            task_count: inputs.task_count,
            mood: inputs.mood,
            score: assessment.score,
            category: assessment.category,
            saved_at,
        }
    }

    pub fn inputs(&self) -> RawInputs {
        RawInputs::new(
            self.sleep_hours,
            self.screen_hours,
            self.task_count,
            self.mood,
        )
    }
}

/// Per-user records in ascending date order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct HistorySeries {
    records: Vec<BurnoutRecord>,
}

impl HistorySeries {
    pub fn from_records(mut records: Vec<BurnoutRecord>) -> Self {
        records.sort_by_key(|record| record.date);
        Self { records }
    }

    pub fn records(&self) -> &[BurnoutRecord] {
        &self.records
    }

    pub fn scores(&self) -> Vec<u8> {
        self.records.iter().map(|record| record.score).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn latest(&self) -> Option<&BurnoutRecord> {
        self.records.last()
    }

    /// Series with any record for `date` removed.
    pub fn without_date(&self, date: NaiveDate) -> Self {
        Self {
            records: self
                .records
                .iter()
                .filter(|record| record.date != date)
                .cloned()
                .collect(),
        }
    }

    pub fn into_records(self) -> Vec<BurnoutRecord> {
        self.records
    }
}
