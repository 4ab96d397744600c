use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::burnout::domain::{BurnoutRecord, RawInputs, UserId};
use crate::workflows::burnout::explanation::{
    ExplanationError, ExplanationGateway, ExplanationRequest,
};
use crate::workflows::burnout::history::{HistoryRepository, RepositoryError, UpsertOutcome};
use crate::workflows::burnout::service::BurnoutService;
use crate::workflows::burnout::sinks::{
    RecordMirror, ScoreBroadcast, ScoreBroadcaster, SinkError,
};

pub(super) fn day(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, day).expect("valid date")
}

pub(super) fn user(raw: &str) -> UserId {
    UserId::parse(Some(raw)).expect("valid user")
}

pub(super) fn tired_day() -> RawInputs {
    RawInputs::new(5.0, 9.0, 7, 2)
}

pub(super) fn rested_day() -> RawInputs {
    RawInputs::new(8.0, 2.0, 1, 5)
}

pub(super) fn build_service() -> (BurnoutService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = BurnoutService::new(repository.clone());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<UserId, BTreeMap<NaiveDate, BurnoutRecord>>>>,
}

impl MemoryRepository {
    pub(super) fn count(&self, user_id: &UserId) -> usize {
        let guard = self.records.lock().expect("repository mutex poisoned");
        guard.get(user_id).map_or(0, BTreeMap::len)
    }
}

impl HistoryRepository for MemoryRepository {
    fn fetch(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<BurnoutRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(user_id).and_then(|days| days.get(&date)).cloned())
    }

    fn upsert(&self, record: BurnoutRecord) -> Result<UpsertOutcome, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let days = guard.entry(record.user_id.clone()).or_default();
        match days.insert(record.date, record) {
            Some(_) => Ok(UpsertOutcome::Replaced),
            None => Ok(UpsertOutcome::Inserted),
        }
    }

    fn list_by_date(&self, user_id: &UserId) -> Result<Vec<BurnoutRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .get(user_id)
            .map(|days| days.values().cloned().collect())
            .unwrap_or_default())
    }
}

pub(super) struct UnavailableRepository;

impl HistoryRepository for UnavailableRepository {
    fn fetch(
        &self,
        _user_id: &UserId,
        _date: NaiveDate,
    ) -> Result<Option<BurnoutRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn upsert(&self, _record: BurnoutRecord) -> Result<UpsertOutcome, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_by_date(&self, _user_id: &UserId) -> Result<Vec<BurnoutRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default)]
pub(super) struct MemoryMirror {
    records: Mutex<Vec<BurnoutRecord>>,
}

impl MemoryMirror {
    pub(super) fn records(&self) -> Vec<BurnoutRecord> {
        self.records.lock().expect("mirror mutex poisoned").clone()
    }
}

impl RecordMirror for MemoryMirror {
    fn mirror(&self, record: &BurnoutRecord) -> Result<(), SinkError> {
        self.records
            .lock()
            .expect("mirror mutex poisoned")
            .push(record.clone());
        Ok(())
    }
}

pub(super) struct BrokenSink;

impl RecordMirror for BrokenSink {
    fn mirror(&self, _record: &BurnoutRecord) -> Result<(), SinkError> {
        Err(SinkError::Unavailable("disk full".to_string()))
    }
}

impl ScoreBroadcaster for BrokenSink {
    fn broadcast(&self, _payload: &ScoreBroadcast) -> Result<(), SinkError> {
        Err(SinkError::Unavailable("no host frame".to_string()))
    }
}

#[derive(Default)]
pub(super) struct MemoryBroadcaster {
    payloads: Mutex<Vec<ScoreBroadcast>>,
}

impl MemoryBroadcaster {
    pub(super) fn payloads(&self) -> Vec<ScoreBroadcast> {
        self.payloads
            .lock()
            .expect("broadcast mutex poisoned")
            .clone()
    }
}

impl ScoreBroadcaster for MemoryBroadcaster {
    fn broadcast(&self, payload: &ScoreBroadcast) -> Result<(), SinkError> {
        self.payloads
            .lock()
            .expect("broadcast mutex poisoned")
            .push(*payload);
        Ok(())
    }
}

#[derive(Default)]
pub(super) struct EchoExplainer {
    requests: Mutex<Vec<ExplanationRequest>>,
}

impl EchoExplainer {
    pub(super) fn requests(&self) -> Vec<ExplanationRequest> {
        self.requests
            .lock()
            .expect("explainer mutex poisoned")
            .clone()
    }
}

impl ExplanationGateway for EchoExplainer {
    fn explain(&self, request: &ExplanationRequest) -> Result<String, ExplanationError> {
        self.requests
            .lock()
            .expect("explainer mutex poisoned")
            .push(request.clone());
        Ok(format!(
            "{} risk at {} for {}",
            request.category, request.score, request.user_id
        ))
    }
}

pub(super) struct FailingExplainer;

impl ExplanationGateway for FailingExplainer {
    fn explain(&self, _request: &ExplanationRequest) -> Result<String, ExplanationError> {
        Err(ExplanationError::Backend("quota exceeded".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
