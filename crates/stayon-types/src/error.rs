use thiserror::Error;

use crate::session::Page;

/// Errors related to transcript persistence.
#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("transcript '{0}' not found")]
    NotFound(String),

    #[error("invalid transcript name: '{0}'")]
    InvalidName(String),

    #[error("malformed transcript: {0}")]
    Malformed(String),

    #[error("filesystem error: {0}")]
    Io(String),
}

/// Errors from page-controller dispatch.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("'{event}' is not available on the {page} page")]
    InvalidTransition { page: Page, event: String },

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Transcript(#[from] TranscriptError),
}
