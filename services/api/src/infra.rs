use burnout_radar::config::AppConfig;
use burnout_radar::workflows::burnout::scoring::{
    normalize, screen_penalty, sleep_penalty, MOOD_WEIGHT, SCREEN_WEIGHT, SLEEP_WEIGHT,
    TASK_WEIGHT,
};
use burnout_radar::workflows::burnout::{
    BurnoutRecord, BurnoutService, ExplanationError, ExplanationGateway, ExplanationRequest,
    HistoryRepository, JsonFileMirror, RepositoryError, ScoreBroadcast, ScoreBroadcaster,
    SinkError, UpsertOutcome, UserId,
};
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

type RecordsByUser = HashMap<UserId, BTreeMap<NaiveDate, BurnoutRecord>>;

#[derive(Default, Clone)]
pub(crate) struct InMemoryHistoryRepository {
    records: Arc<Mutex<RecordsByUser>>,
}

impl InMemoryHistoryRepository {
    fn lock(&self) -> Result<MutexGuard<'_, RecordsByUser>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }
}

impl HistoryRepository for InMemoryHistoryRepository {
    fn fetch(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<BurnoutRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.get(user_id).and_then(|days| days.get(&date)).cloned())
    }

    fn upsert(&self, record: BurnoutRecord) -> Result<UpsertOutcome, RepositoryError> {
        let mut guard = self.lock()?;
        let days = guard.entry(record.user_id.clone()).or_default();
        match days.insert(record.date, record) {
            Some(_) => Ok(UpsertOutcome::Replaced),
            None => Ok(UpsertOutcome::Inserted),
        }
    }

    fn list_by_date(&self, user_id: &UserId) -> Result<Vec<BurnoutRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .get(user_id)
            .map(|days| days.values().cloned().collect())
            .unwrap_or_default())
    }
}

/// Stand-in for a hosting frame: computed payloads are emitted as debug events.
#[derive(Default, Clone)]
pub(crate) struct TracingScoreBroadcaster;

impl ScoreBroadcaster for TracingScoreBroadcaster {
    fn broadcast(&self, payload: &ScoreBroadcast) -> Result<(), SinkError> {
        debug!(
            sleep_hours = payload.sleep_hours,
            screen_hours = payload.screen_hours,
            task_count = payload.task_count,
            score = payload.score,
            category = %payload.category,
            "score computed"
        );
        Ok(())
    }
}

/// Offline explainer naming the driver that contributes most to the composite.
#[derive(Default, Clone)]
pub(crate) struct DriverSummaryExplainer;

impl ExplanationGateway for DriverSummaryExplainer {
    fn explain(&self, request: &ExplanationRequest) -> Result<String, ExplanationError> {
        let sub_scores = normalize(&request.inputs.clamped());
        let contributions = [
            ("short sleep", SLEEP_WEIGHT * sleep_penalty(sub_scores.sleep)),
            ("screen time", SCREEN_WEIGHT * screen_penalty(sub_scores.screen)),
            ("task load", TASK_WEIGHT * sub_scores.tasks),
            ("low mood", MOOD_WEIGHT * sub_scores.mood),
        ];

        let mut text = format!(
            "Your burnout risk is {} ({}/100).",
            request.category.label().to_lowercase(),
            request.score
        );

        let top = contributions
            .iter()
            .filter(|(_, points)| *points > 0.0)
            .max_by(|left, right| left.1.total_cmp(&right.1));
        match top {
            Some((driver, points)) => text.push_str(&format!(
                " The largest contributor today is {driver}, worth about {:.0} points.",
                points * 100.0
            )),
            None => text.push_str(" None of the tracked drivers are adding risk today."),
        }

        if !request.context.is_empty() {
            text.push_str(&format!(" You mentioned: \"{}\".", request.context));
        }

        Ok(text)
    }
}

/// Wire the service with the collaborators selected by configuration.
pub(crate) fn build_service(
    config: &AppConfig,
    repository: Arc<InMemoryHistoryRepository>,
) -> BurnoutService<InMemoryHistoryRepository> {
    let mut service = BurnoutService::new(repository)
        .with_broadcaster(Arc::new(TracingScoreBroadcaster));

    if let Some(dir) = &config.storage.mirror_dir {
        service = service.with_mirror(Arc::new(JsonFileMirror::new(dir.clone())));
    }
    if config.explanations.enabled {
        service = service.with_explainer(Arc::new(DriverSummaryExplainer));
    }

    service
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
