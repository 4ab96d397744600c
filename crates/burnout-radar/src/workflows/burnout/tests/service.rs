use super::common::*;
use crate::workflows::burnout::breakdown::Zone;
use crate::workflows::burnout::domain::RawInputs;
use crate::workflows::burnout::explanation::ExplanationError;
use crate::workflows::burnout::history::UpsertOutcome;
use crate::workflows::burnout::scoring::compute_score;
use crate::workflows::burnout::service::{BurnoutService, BurnoutServiceError};
use crate::workflows::burnout::trend::TrendDirection;
use std::sync::Arc;

fn seed(service: &BurnoutService<MemoryRepository>, scores_for: &[(u32, RawInputs)]) {
    let alice = user("alice");
    for (date, inputs) in scores_for {
        service.save(&alice, day(*date), inputs).expect("seed save");
    }
}

#[test]
fn save_reports_insert_then_replace() {
    let (service, repository) = build_service();
    let alice = user("Alice");

    let first = service.save(&alice, day(1), &tired_day()).expect("save");
    let second = service.save(&alice, day(1), &rested_day()).expect("save");

    assert_eq!(first.outcome, UpsertOutcome::Inserted);
    assert_eq!(second.outcome, UpsertOutcome::Replaced);
    assert_eq!(second.record.user_id.as_str(), "alice");
    assert_eq!(repository.count(&alice), 1);
    assert!(second.record.saved_at >= first.record.saved_at);
}

#[test]
fn save_mirrors_each_record() {
    let mirror = Arc::new(MemoryMirror::default());
    let (service, _) = build_service();
    let service = service.with_mirror(mirror.clone());

    let saved = service
        .save(&user("alice"), day(2), &tired_day())
        .expect("save");

    assert_eq!(mirror.records(), vec![saved.record]);
}

#[test]
fn broken_sinks_never_fail_the_save() {
    let (service, repository) = build_service();
    let service = service
        .with_mirror(Arc::new(BrokenSink))
        .with_broadcaster(Arc::new(BrokenSink));

    let saved = service.save(&user("alice"), day(2), &tired_day());

    assert!(saved.is_ok());
    assert_eq!(repository.count(&user("alice")), 1);
}

#[test]
fn assess_broadcasts_the_computed_payload() {
    let broadcaster = Arc::new(MemoryBroadcaster::default());
    let (service, _) = build_service();
    let service = service.with_broadcaster(broadcaster.clone());

    let assessment = service.assess(&RawInputs::new(3.0, 20.0, 9, 1));

    let payloads = broadcaster.payloads();
    assert_eq!(payloads.len(), 1);
    assert_eq!(payloads[0].screen_hours, 16.0);
    assert_eq!(payloads[0].score, assessment.score);
    assert_eq!(payloads[0].category, assessment.category);
}

#[test]
fn save_propagates_unavailable_repository() {
    let service = BurnoutService::new(Arc::new(UnavailableRepository));

    match service.save(&user("alice"), day(1), &tired_day()) {
        Err(error @ BurnoutServiceError::Repository(_)) => assert!(error.is_retryable()),
        other => panic!("expected repository error, got {other:?}"),
    }
}

#[test]
fn insights_project_from_prior_days() {
    let (service, _) = build_service();
    seed(
        &service,
        &[
            (1, RawInputs::new(8.0, 2.0, 1, 5)),
            (2, RawInputs::new(7.0, 5.0, 3, 4)),
            (3, RawInputs::new(6.0, 8.0, 5, 3)),
        ],
    );
    let alice = user("alice");
    let history = service.history(&alice).expect("history");
    let scores = history.scores();
    let mean_delta = (f64::from(scores[2]) - f64::from(scores[0])) / 2.0;

    let current = RawInputs::new(5.0, 9.0, 6, 2);
    let insights = service.insights(&alice, &current, day(4));
    let current_score = compute_score(&current).score;

    assert!(insights.history_available);
    assert_eq!(insights.history_days, 3);
    let trend = insights.trend.expect("three prior days");
    assert_eq!(trend.direction, TrendDirection::Rising);
    assert_eq!(
        insights.projection(),
        Some((f64::from(current_score) + mean_delta).clamp(0.0, 100.0) as u8)
    );
    assert!(insights.score_with_extra_sleep < insights.assessment.score);
    assert_eq!(
        insights
            .breakdown
            .iter()
            .map(|share| u32::from(share.magnitude))
            .sum::<u32>(),
        100
    );
}

#[test]
fn insights_ignore_todays_saved_record() {
    let (service, _) = build_service();
    seed(
        &service,
        &[
            (1, tired_day()),
            (2, tired_day()),
            (3, rested_day()),
        ],
    );
    let alice = user("alice");

    // Only two days precede the 3rd, so no projection is offered.
    let insights = service.insights(&alice, &rested_day(), day(3));
    assert!(insights.trend.is_none());
    assert_eq!(insights.history_days, 3);
}

#[test]
fn insights_survive_unavailable_history() {
    let service = BurnoutService::new(Arc::new(UnavailableRepository));

    let insights = service.insights(&user("alice"), &RawInputs::new(4.0, 12.0, 9, 1), day(1));

    assert!(!insights.history_available);
    assert!(insights.trend.is_none());
    assert_eq!(insights.assessment.score, 77);
    assert_eq!(
        insights.breakdown.last().map(|share| share.zone),
        Some(Zone::Burnout)
    );
}

#[test]
fn explain_sends_structured_request() {
    let explainer = Arc::new(EchoExplainer::default());
    let (service, _) = build_service();
    let service = service.with_explainer(explainer.clone());

    let text = service
        .explain(&user("alice"), &tired_day(), "  deadline week ")
        .expect("explanation");

    let requests = explainer.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.context, "deadline week");
    assert_eq!(request.inputs, tired_day());
    assert_eq!(request.score, compute_score(&tired_day()).score);
    assert!(text.contains(request.category.label()));
}

#[test]
fn explanation_failures_are_isolated() {
    let (service, repository) = build_service();
    let service = service.with_explainer(Arc::new(FailingExplainer));
    let alice = user("alice");

    match service.explain(&alice, &tired_day(), "") {
        Err(BurnoutServiceError::Explanation(ExplanationError::Backend(_))) => {}
        other => panic!("expected backend error, got {other:?}"),
    }

    service.save(&alice, day(1), &tired_day()).expect("save still works");
    assert_eq!(repository.count(&alice), 1);
}

#[test]
fn explain_without_gateway_is_disabled() {
    let (service, _) = build_service();

    match service.explain(&user("alice"), &tired_day(), "") {
        Err(BurnoutServiceError::Explanation(ExplanationError::Disabled)) => {}
        other => panic!("expected disabled error, got {other:?}"),
    }
}
