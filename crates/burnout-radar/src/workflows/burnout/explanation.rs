use serde::Serialize;

use super::domain::{Assessment, RawInputs, RiskCategory, UserId};

/// Structured payload handed to a text-generation collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplanationRequest {
    pub user_id: UserId,
    pub inputs: RawInputs,
    pub score: u8,
    pub category: RiskCategory,
    pub context: String,
}

impl ExplanationRequest {
    pub fn new(user_id: UserId, assessment: &Assessment, context: impl Into<String>) -> Self {
        Self {
            user_id,
            inputs: assessment.inputs,
            score: assessment.score,
            category: assessment.category,
            context: context.into().trim().to_string(),
        }
    }
}

/// Outbound hook for prose explanations. The returned text is passed through unchanged.
pub trait ExplanationGateway: Send + Sync {
    fn explain(&self, request: &ExplanationRequest) -> Result<String, ExplanationError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExplanationError {
    #[error("explanations are disabled")]
    Disabled,
    #[error("explanation service failed: {0}")]
    Backend(String),
}
