use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::io::Read;

use crate::workflows::burnout::RawInputs;

#[derive(Debug, Clone, PartialEq)]
pub struct JournalEntry {
    pub date: NaiveDate,
    pub inputs: RawInputs,
}

#[derive(Debug)]
pub enum ParseError {
    Csv(csv::Error),
    InvalidDate { line: u64, value: String },
}

impl From<csv::Error> for ParseError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub(crate) fn parse_entries<R: Read>(reader: R) -> Result<Vec<JournalEntry>, ParseError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut entries = Vec::new();

    for (index, record) in csv_reader.deserialize::<JournalRow>().enumerate() {
        let row = record?;
        // Header occupies line 1.
        let line = index as u64 + 2;
        let date = parse_date(&row.date).ok_or_else(|| ParseError::InvalidDate {
            line,
            value: row.date.clone(),
        })?;

        entries.push(JournalEntry {
            date,
            inputs: RawInputs::new(
                row.sleep_hours,
                row.screen_hours,
                row.task_count,
                row.mood,
            ),
        });
    }

    Ok(entries)
}

#[derive(Debug, Deserialize)]
struct JournalRow {
    #[serde(alias = "Date")]
    date: String,
    #[serde(alias = "sleep", alias = "Sleep")]
    sleep_hours: f64,
    #[serde(alias = "screen", alias = "Screen")]
    screen_hours: f64,
    #[serde(alias = "tasks", alias = "Tasks", deserialize_with = "whole_number")]
    task_count: i32,
    #[serde(alias = "Mood", deserialize_with = "whole_number")]
    mood: i32,
}

fn whole_number<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() {
        return Err(serde::de::Error::custom("expected a finite number"));
    }
    Ok(value.trunc() as i32)
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}
