//! Application error type mapping to HTTP status codes and envelope format.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use stayon_types::error::{ControllerError, TranscriptError};

use crate::http::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    Controller(ControllerError),
    /// Missing or unknown session token.
    Unauthorized(String),
    Validation(String),
}

impl From<ControllerError> for AppError {
    fn from(e: ControllerError) -> Self {
        AppError::Controller(e)
    }
}

impl From<TranscriptError> for AppError {
    fn from(e: TranscriptError) -> Self {
        AppError::Controller(ControllerError::Transcript(e))
    }
}

impl AppError {
    /// Status code, machine-readable code and message.
    pub fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Controller(ControllerError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Controller(e @ ControllerError::InvalidTransition { .. }) => {
                (StatusCode::CONFLICT, "INVALID_TRANSITION", e.to_string())
            }
            AppError::Controller(ControllerError::Transcript(e)) => match e {
                TranscriptError::NotFound(_) => {
                    (StatusCode::NOT_FOUND, "TRANSCRIPT_NOT_FOUND", e.to_string())
                }
                TranscriptError::InvalidName(_) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
                }
                TranscriptError::Malformed(_) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "MALFORMED_TRANSCRIPT",
                    e.to_string(),
                ),
                TranscriptError::Io(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR", e.to_string())
                }
            },
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        if status.is_server_error() {
            tracing::error!(code, %message, "Request failed");
        }
        (status, Json(ApiResponse::error(code, &message))).into_response()
    }
}
