use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::domain::{Assessment, BurnoutRecord, HistorySeries, UserId};

/// Storage abstraction keyed by (user, date) so the store can be exercised with test doubles.
pub trait HistoryRepository: Send + Sync {
    fn fetch(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<BurnoutRecord>, RepositoryError>;

    /// Write the record under its (user, date) key in a single atomic step, replacing any
    /// record already stored for that day.
    fn upsert(&self, record: BurnoutRecord) -> Result<UpsertOutcome, RepositoryError>;

    /// All records for the user, ascending by date.
    fn list_by_date(&self, user_id: &UserId) -> Result<Vec<BurnoutRecord>, RepositoryError>;
}

/// Whether an upsert created the day's record or replaced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertOutcome {
    Inserted,
    Replaced,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("history store unavailable: {0}")]
    Unavailable(String),
}

impl RepositoryError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, RepositoryError::Unavailable(_))
    }
}

/// Day-keyed history built on top of a [`HistoryRepository`].
pub struct HistoryStore<R> {
    repository: Arc<R>,
}

impl<R> Clone for HistoryStore<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R> HistoryStore<R>
where
    R: HistoryRepository,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Insert or replace the record for `(user_id, date)`.
    pub fn upsert(
        &self,
        user_id: &UserId,
        date: NaiveDate,
        assessment: &Assessment,
        saved_at: DateTime<Utc>,
    ) -> Result<(BurnoutRecord, UpsertOutcome), RepositoryError> {
        let record = BurnoutRecord::from_assessment(user_id.clone(), date, assessment, saved_at);
        let outcome = self.repository.upsert(record.clone())?;
        Ok((record, outcome))
    }

    pub fn record_for(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<BurnoutRecord>, RepositoryError> {
        self.repository.fetch(user_id, date)
    }

    pub fn list_history(&self, user_id: &UserId) -> Result<HistorySeries, RepositoryError> {
        let records = self.repository.list_by_date(user_id)?;
        Ok(HistorySeries::from_records(records))
    }
}
