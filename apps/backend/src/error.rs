//! Error handling for the quiz API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use quiz_core::EngineError;
use serde::Serialize;
use thiserror::Error;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn no_session(user_id: &str) -> Self {
        ApiError::NotFound(format!("no session for user {}, import a deck first", user_id))
    }

    fn status(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
            ApiError::Engine(e) => match e {
                EngineError::Parse(_) => (StatusCode::BAD_REQUEST, "parse_error"),
                EngineError::EmptyDeck => (StatusCode::BAD_REQUEST, "empty_deck"),
                EngineError::InsufficientGroup { .. } => {
                    (StatusCode::BAD_REQUEST, "insufficient_group")
                }
                EngineError::InvalidUserId(_) => (StatusCode::BAD_REQUEST, "invalid_user_id"),
                EngineError::InvalidPosition { .. } => {
                    (StatusCode::BAD_REQUEST, "invalid_position")
                }
                EngineError::NoPendingQuiz => (StatusCode::CONFLICT, "no_pending_quiz"),
                EngineError::ZeroOptions
                | EngineError::WeightLengthMismatch { .. }
                | EngineError::IndexOutOfRange { .. }
                | EngineError::InvalidWeights(_) => (StatusCode::BAD_REQUEST, "bad_request"),
                EngineError::CorruptState { .. } => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "corrupt_state")
                }
                EngineError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "io_error"),
            },
        }
    }
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
