use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::burnout::{BurnoutServiceError, IdentityError};
use crate::workflows::journal::JournalImportError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Identity(IdentityError),
    Burnout(BurnoutServiceError),
    Journal(JournalImportError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Identity(err) => write!(f, "identity error: {}", err),
            AppError::Burnout(err) => write!(f, "burnout service error: {}", err),
            AppError::Journal(err) => write!(f, "journal import error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Identity(err) => Some(err),
            AppError::Burnout(err) => Some(err),
            AppError::Journal(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Identity(_) => StatusCode::UNAUTHORIZED,
            AppError::Journal(JournalImportError::Csv(_))
            | AppError::Journal(JournalImportError::InvalidDate { .. }) => StatusCode::BAD_REQUEST,
            AppError::Burnout(err) | AppError::Journal(JournalImportError::Service(err))
                if err.is_retryable() =>
            {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Burnout(_)
            | AppError::Journal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<IdentityError> for AppError {
    fn from(value: IdentityError) -> Self {
        Self::Identity(value)
    }
}

impl From<BurnoutServiceError> for AppError {
    fn from(value: BurnoutServiceError) -> Self {
        Self::Burnout(value)
    }
}

impl From<JournalImportError> for AppError {
    fn from(value: JournalImportError) -> Self {
        Self::Journal(value)
    }
}
