//! Disc Golf API — error types.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use discgolf_core::error::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection or pool error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Trace exporter could not be installed.
    #[error("telemetry error: {0}")]
    Telemetry(String),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer error that implements `IntoResponse`.
#[derive(Debug)]
pub enum ApiError {
    /// An error raised by the game context.
    Domain(DomainError),
    /// A game identifier that could not be parsed; no such game can exist.
    UnknownGameId(String),
    /// A request body that is not JSON or does not match the expected shape.
    MalformedBody(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection.body_text())
    }
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::UnknownGameId(_) => (StatusCode::NOT_FOUND, "game_not_found"),
            Self::MalformedBody(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            Self::Domain(err) => match err {
                DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
                DomainError::AlreadyStarted(_) => (StatusCode::BAD_REQUEST, "already_started"),
                DomainError::NotCreator { .. } => (StatusCode::BAD_REQUEST, "not_creator"),
                DomainError::NotStarted(_) => (StatusCode::BAD_REQUEST, "not_started"),
                DomainError::NotInGame { .. } => (StatusCode::BAD_REQUEST, "not_in_game"),
                DomainError::DuplicatePlayer { .. } => {
                    (StatusCode::BAD_REQUEST, "duplicate_player")
                }
                DomainError::GameNotFound(_) => (StatusCode::NOT_FOUND, "game_not_found"),
                DomainError::Infrastructure(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "infrastructure_error")
                }
            },
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Domain(err) => err.to_string(),
            Self::UnknownGameId(raw) => format!("game not found: {raw}"),
            Self::MalformedBody(detail) => format!("malformed request body: {detail}"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self.message(), "request failed");
        }

        let body = ErrorBody {
            error: error_code,
            message: self.message(),
        };

        (status, Json(body)).into_response()
    }
}
