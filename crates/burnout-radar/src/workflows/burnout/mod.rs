//! Daily burnout risk scoring, day-keyed history, and the analytics derived from both.
//!
//! The calculator is pure. Persistence, record mirroring, score broadcasting, and prose
//! explanations are collaborators injected into [`BurnoutService`] at construction time.

pub mod breakdown;
pub mod counterfactual;
pub mod domain;
pub mod explanation;
pub mod history;
pub mod router;
pub mod scoring;
pub mod service;
pub mod sinks;
pub mod trend;

#[cfg(test)]
mod tests;

pub use breakdown::{decompose, Zone, ZoneShare};
pub use counterfactual::{simulate, simulate_sleep_increase, Perturbation};
pub use domain::{
    Assessment, BurnoutRecord, HistorySeries, IdentityError, RawInputs, RiskCategory, SubScores,
    UserId,
};
pub use explanation::{ExplanationError, ExplanationGateway, ExplanationRequest};
pub use history::{HistoryRepository, HistoryStore, RepositoryError, UpsertOutcome};
pub use router::burnout_router;
pub use scoring::{composite_score, compute_score};
pub use service::{BurnoutService, BurnoutServiceError, Insights, SavedEntry};
pub use sinks::{JsonFileMirror, RecordMirror, ScoreBroadcast, ScoreBroadcaster, SinkError};
pub use trend::{project_next, TrendDirection, TrendSummary};
