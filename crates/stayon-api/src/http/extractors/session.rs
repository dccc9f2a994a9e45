//! Session-token extractor.
//!
//! The token returned by login is read from:
//! - `Authorization: Bearer <session_id>` header
//! - `X-Session-Id: <session_id>` header

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;
use tokio::sync::Mutex;

use stayon_types::session::Session;

use crate::http::error::AppError;
use crate::state::AppState;

/// A logged-in session resolved from the request headers.
#[derive(Clone)]
pub struct SessionHandle {
    pub session_id: String,
    pub session: Arc<Mutex<Session>>,
}

impl FromRequestParts<AppState> for SessionHandle {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session_id = extract_session_id(&parts.headers)?;
        let session = state.touch_session(&session_id).ok_or_else(|| {
            AppError::Unauthorized("Unknown or expired session. Log in again.".to_string())
        })?;
        Ok(SessionHandle {
            session_id,
            session,
        })
    }
}

/// Extract the session id from request headers.
fn extract_session_id(headers: &HeaderMap) -> Result<String, AppError> {
    if let Some(auth) = headers.get("authorization") {
        let auth_str = auth.to_str().map_err(|_| {
            AppError::Unauthorized("Invalid Authorization header encoding".to_string())
        })?;
        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            let token = token.trim();
            if !token.is_empty() {
                return Ok(token.to_string());
            }
        }
    }

    if let Some(id) = headers.get("x-session-id") {
        let id_str = id.to_str().map_err(|_| {
            AppError::Unauthorized("Invalid X-Session-Id header encoding".to_string())
        })?;
        let id_str = id_str.trim();
        if !id_str.is_empty() {
            return Ok(id_str.to_string());
        }
    }

    Err(AppError::Unauthorized(
        "Missing session. Provide it via 'Authorization: Bearer <id>' or 'X-Session-Id: <id>' header.".to_string(),
    ))
}
