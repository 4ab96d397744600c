use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::breakdown::{decompose, ZoneShare};
use super::counterfactual::simulate_sleep_increase;
use super::domain::{Assessment, BurnoutRecord, IdentityError, RawInputs, UserId};
use super::explanation::ExplanationError;
use super::history::{HistoryRepository, UpsertOutcome};
use super::service::{BurnoutService, BurnoutServiceError};
use super::trend::{summarize, TrendSummary};

/// Router builder exposing the scoring, history, and insight endpoints.
pub fn burnout_router<R>(service: Arc<BurnoutService<R>>) -> Router
where
    R: HistoryRepository + 'static,
{
    Router::new()
        .route("/api/v1/burnout/score", post(score_handler::<R>))
        .route("/api/v1/burnout/entries", post(save_handler::<R>))
        .route("/api/v1/burnout/history", get(history_handler::<R>))
        .route("/api/v1/burnout/insights", post(insights_handler::<R>))
        .route("/api/v1/burnout/explanation", post(explanation_handler::<R>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct IdentityQuery {
    #[serde(default)]
    pub(crate) user: Option<String>,
}

impl IdentityQuery {
    fn user_id(&self) -> Result<UserId, IdentityError> {
        UserId::parse(self.user.as_deref())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SaveEntryRequest {
    #[serde(flatten)]
    pub(crate) inputs: RawInputs,
    #[serde(default)]
    pub(crate) date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExplanationPayload {
    pub(crate) inputs: RawInputs,
    #[serde(default)]
    pub(crate) context: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoreResponse {
    #[serde(flatten)]
    pub(crate) assessment: Assessment,
    pub(crate) breakdown: Vec<ZoneShare>,
    pub(crate) score_with_extra_sleep: u8,
}

#[derive(Debug, Serialize)]
pub(crate) struct HistoryResponse {
    pub(crate) user: UserId,
    pub(crate) records: Vec<BurnoutRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) trend: Option<TrendSummary>,
}

pub(crate) async fn score_handler<R>(
    State(service): State<Arc<BurnoutService<R>>>,
    Query(identity): Query<IdentityQuery>,
    axum::Json(inputs): axum::Json<RawInputs>,
) -> Response
where
    R: HistoryRepository + 'static,
{
    if let Err(error) = identity.user_id() {
        return identity_error(error);
    }

    let assessment = service.assess(&inputs);
    let body = ScoreResponse {
        breakdown: decompose(assessment.score),
        score_with_extra_sleep: simulate_sleep_increase(
            &assessment.inputs,
            &assessment.sub_scores,
        ),
        assessment,
    };
    (StatusCode::OK, axum::Json(body)).into_response()
}

pub(crate) async fn save_handler<R>(
    State(service): State<Arc<BurnoutService<R>>>,
    Query(identity): Query<IdentityQuery>,
    axum::Json(request): axum::Json<SaveEntryRequest>,
) -> Response
where
    R: HistoryRepository + 'static,
{
    let user_id = match identity.user_id() {
        Ok(user_id) => user_id,
        Err(error) => return identity_error(error),
    };

    let date = request.date.unwrap_or_else(|| Local::now().date_naive());
    match service.save(&user_id, date, &request.inputs) {
        Ok(saved) => {
            let status = match saved.outcome {
                UpsertOutcome::Inserted => StatusCode::CREATED,
                UpsertOutcome::Replaced => StatusCode::OK,
            };
            (status, axum::Json(saved)).into_response()
        }
        Err(error) => service_error(error),
    }
}

pub(crate) async fn history_handler<R>(
    State(service): State<Arc<BurnoutService<R>>>,
    Query(identity): Query<IdentityQuery>,
) -> Response
where
    R: HistoryRepository + 'static,
{
    let user_id = match identity.user_id() {
        Ok(user_id) => user_id,
        Err(error) => return identity_error(error),
    };

    match service.history(&user_id) {
        Ok(history) => {
            // The latest stored day stands in for the current score.
            let trend = history.latest().and_then(|latest| {
                summarize(&history.without_date(latest.date), latest.score)
            });
            let body = HistoryResponse {
                user: user_id,
                records: history.into_records(),
                trend,
            };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(error) => service_error(error),
    }
}

pub(crate) async fn insights_handler<R>(
    State(service): State<Arc<BurnoutService<R>>>,
    Query(identity): Query<IdentityQuery>,
    axum::Json(inputs): axum::Json<RawInputs>,
) -> Response
where
    R: HistoryRepository + 'static,
{
    let user_id = match identity.user_id() {
        Ok(user_id) => user_id,
        Err(error) => return identity_error(error),
    };

    let insights = service.insights(&user_id, &inputs, Local::now().date_naive());
    (StatusCode::OK, axum::Json(insights)).into_response()
}

pub(crate) async fn explanation_handler<R>(
    State(service): State<Arc<BurnoutService<R>>>,
    Query(identity): Query<IdentityQuery>,
    axum::Json(payload): axum::Json<ExplanationPayload>,
) -> Response
where
    R: HistoryRepository + 'static,
{
    let user_id = match identity.user_id() {
        Ok(user_id) => user_id,
        Err(error) => return identity_error(error),
    };

    match service.explain(&user_id, &payload.inputs, &payload.context) {
        Ok(explanation) => {
            (StatusCode::OK, axum::Json(json!({ "explanation": explanation }))).into_response()
        }
        Err(error) => service_error(error),
    }
}

fn identity_error(error: IdentityError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::UNAUTHORIZED, axum::Json(payload)).into_response()
}

fn service_error(error: BurnoutServiceError) -> Response {
    let status = match &error {
        BurnoutServiceError::Repository(_) => StatusCode::SERVICE_UNAVAILABLE,
        BurnoutServiceError::Explanation(ExplanationError::Disabled) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        BurnoutServiceError::Explanation(ExplanationError::Backend(_)) => StatusCode::BAD_GATEWAY,
    };
    let payload = json!({
        "error": error.to_string(),
        "retryable": error.is_retryable(),
    });
    (status, axum::Json(payload)).into_response()
}
