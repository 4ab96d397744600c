//! Import of past daily entries from a CSV journal.
//!
//! Expected headers: `date,sleep_hours,screen_hours,task_count,mood` (`sleep`, `screen`, and
//! `tasks` are accepted as aliases). Dates use `YYYY-MM-DD`.

mod parser;

use crate::workflows::burnout::{
    BurnoutService, BurnoutServiceError, HistoryRepository, UpsertOutcome, UserId,
};
use std::io::Read;
use std::path::Path;

pub use parser::JournalEntry;
use parser::ParseError;

#[derive(Debug)]
pub enum JournalImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidDate { line: u64, value: String },
    Service(BurnoutServiceError),
}

impl std::fmt::Display for JournalImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JournalImportError::Io(err) => write!(f, "failed to read journal: {}", err),
            JournalImportError::Csv(err) => write!(f, "invalid journal CSV data: {}", err),
            JournalImportError::InvalidDate { line, value } => write!(
                f,
                "invalid journal date '{}' on line {} (expected YYYY-MM-DD)",
                value, line
            ),
            JournalImportError::Service(err) => {
                write!(f, "could not store journal entry: {}", err)
            }
        }
    }
}

impl std::error::Error for JournalImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            JournalImportError::Io(err) => Some(err),
            JournalImportError::Csv(err) => Some(err),
            JournalImportError::InvalidDate { .. } => None,
            JournalImportError::Service(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for JournalImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for JournalImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<BurnoutServiceError> for JournalImportError {
    fn from(err: BurnoutServiceError) -> Self {
        Self::Service(err)
    }
}

impl From<ParseError> for JournalImportError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Csv(err) => Self::Csv(err),
            ParseError::InvalidDate { line, value } => Self::InvalidDate { line, value },
        }
    }
}

/// Counts of days written by an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub inserted: usize,
    pub replaced: usize,
}

pub struct JournalImporter;

impl JournalImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<JournalEntry>, JournalImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<JournalEntry>, JournalImportError> {
        Ok(parser::parse_entries(reader)?)
    }

    /// Save every entry for `user_id` in file order; a later row for the same date wins.
    pub fn import_into<Repo>(
        service: &BurnoutService<Repo>,
        user_id: &UserId,
        entries: &[JournalEntry],
    ) -> Result<ImportSummary, JournalImportError>
    where
        Repo: HistoryRepository + 'static,
    {
        let mut summary = ImportSummary::default();

        for entry in entries {
            let saved = service.save(user_id, entry.date, &entry.inputs)?;
            match saved.outcome {
                UpsertOutcome::Inserted => summary.inserted += 1,
                UpsertOutcome::Replaced => summary.replaced += 1,
            }
        }

        Ok(summary)
    }
}
