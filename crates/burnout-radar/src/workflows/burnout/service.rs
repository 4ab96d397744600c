use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::breakdown::{decompose, ZoneShare};
use super::counterfactual::simulate_sleep_increase;
use super::domain::{Assessment, BurnoutRecord, HistorySeries, RawInputs, UserId};
use super::explanation::{ExplanationError, ExplanationGateway, ExplanationRequest};
use super::history::{HistoryRepository, HistoryStore, RepositoryError, UpsertOutcome};
use super::scoring::compute_score;
use super::sinks::{RecordMirror, ScoreBroadcast, ScoreBroadcaster};
use super::trend::{summarize, TrendSummary};

/// Service composing the calculator, day-keyed history, and optional collaborators.
pub struct BurnoutService<R> {
    store: HistoryStore<R>,
    mirror: Option<Arc<dyn RecordMirror>>,
    broadcaster: Option<Arc<dyn ScoreBroadcaster>>,
    explainer: Option<Arc<dyn ExplanationGateway>>,
}

/// Result of a save action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavedEntry {
    pub record: BurnoutRecord,
    pub outcome: UpsertOutcome,
}

/// Everything derived for the dashboard from the current inputs and stored history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    pub assessment: Assessment,
    pub breakdown: Vec<ZoneShare>,
    pub score_with_extra_sleep: u8,
    pub history_available: bool,
    pub history_days: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<TrendSummary>,
}

impl Insights {
    pub fn projection(&self) -> Option<u8> {
        self.trend.map(|trend| trend.projected_next)
    }
}

impl<R> BurnoutService<R>
where
    R: HistoryRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            store: HistoryStore::new(repository),
            mirror: None,
            broadcaster: None,
            explainer: None,
        }
    }

    pub fn with_mirror(mut self, mirror: Arc<dyn RecordMirror>) -> Self {
        self.mirror = Some(mirror);
        self
    }

    pub fn with_broadcaster(mut self, broadcaster: Arc<dyn ScoreBroadcaster>) -> Self {
        self.broadcaster = Some(broadcaster);
        self
    }

    pub fn with_explainer(mut self, explainer: Arc<dyn ExplanationGateway>) -> Self {
        self.explainer = Some(explainer);
        self
    }

    pub fn store(&self) -> &HistoryStore<R> {
        &self.store
    }

    /// Score the inputs and notify the broadcaster, if any.
    pub fn assess(&self, raw: &RawInputs) -> Assessment {
        let assessment = compute_score(raw);

        if let Some(broadcaster) = &self.broadcaster {
            if let Err(error) = broadcaster.broadcast(&ScoreBroadcast::from(&assessment)) {
                debug!(%error, "score broadcast dropped");
            }
        }

        assessment
    }

    /// Score and persist the inputs as the record for `date`.
    pub fn save(
        &self,
        user_id: &UserId,
        date: NaiveDate,
        raw: &RawInputs,
    ) -> Result<SavedEntry, BurnoutServiceError> {
        let assessment = self.assess(raw);
        let (record, outcome) = self.store.upsert(user_id, date, &assessment, Utc::now())?;

        info!(
            user = %user_id,
            %date,
            score = record.score,
            category = %record.category,
            ?outcome,
            "burnout entry saved"
        );

        if let Some(mirror) = &self.mirror {
            if let Err(error) = mirror.mirror(&record) {
                warn!(user = %user_id, %error, "record mirror write failed");
            }
        }

        Ok(SavedEntry { record, outcome })
    }

    pub fn history(&self, user_id: &UserId) -> Result<HistorySeries, BurnoutServiceError> {
        Ok(self.store.list_history(user_id)?)
    }

    /// Assessment, zone breakdown, sleep what-if, and trend for the current inputs.
    ///
    /// The trend is computed from stored days other than `today`. If the history cannot be
    /// read the in-memory derivations are still returned, without a trend.
    pub fn insights(&self, user_id: &UserId, raw: &RawInputs, today: NaiveDate) -> Insights {
        let assessment = self.assess(raw);
        let breakdown = decompose(assessment.score);
        let score_with_extra_sleep =
            simulate_sleep_increase(&assessment.inputs, &assessment.sub_scores);

        let (history_available, history_days, trend) = match self.store.list_history(user_id) {
            Ok(history) => {
                let prior = history.without_date(today);
                (true, history.len(), summarize(&prior, assessment.score))
            }
            Err(error) => {
                warn!(user = %user_id, %error, "history unavailable; skipping trend");
                (false, 0, None)
            }
        };

        Insights {
            assessment,
            breakdown,
            score_with_extra_sleep,
            history_available,
            history_days,
            trend,
        }
    }

    /// Ask the explanation collaborator to describe the current assessment.
    pub fn explain(
        &self,
        user_id: &UserId,
        raw: &RawInputs,
        context: &str,
    ) -> Result<String, BurnoutServiceError> {
        let explainer = self.explainer.as_ref().ok_or(ExplanationError::Disabled)?;
        let assessment = compute_score(raw);
        let request = ExplanationRequest::new(user_id.clone(), &assessment, context);
        Ok(explainer.explain(&request)?)
    }
}

/// Error raised by the burnout service.
#[derive(Debug, thiserror::Error)]
pub enum BurnoutServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Explanation(#[from] ExplanationError),
}

impl BurnoutServiceError {
    pub fn is_retryable(&self) -> bool {
        match self {
            BurnoutServiceError::Repository(error) => error.is_retryable(),
            BurnoutServiceError::Explanation(_) => false,
        }
    }
}
