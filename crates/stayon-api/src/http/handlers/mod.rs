//! REST API endpoint handlers.

pub mod auth;
pub mod session;
pub mod topics;
pub mod transcript;

use std::time::Instant;

use axum::Json;
use serde::Serialize;
use tracing::debug;

use stayon_core::controller::{Event, EventKind, Outcome, available_events};
use stayon_types::session::Session;

use crate::http::error::AppError;
use crate::http::extractors::session::SessionHandle;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// A session as the front end sees it: every field plus the actions the
/// current page allows.
#[derive(Debug, Serialize)]
pub struct SessionView {
    #[serde(flatten)]
    pub session: Session,
    pub available_events: Vec<EventKind>,
}

impl SessionView {
    pub fn of(session: &Session) -> Self {
        Self {
            session: session.clone(),
            available_events: available_events(session.page),
        }
    }
}

/// Result of one dispatched event.
#[derive(Debug, Serialize)]
pub struct ActionView {
    pub outcome: Outcome,
    pub session: SessionView,
}

/// Lock the session, dispatch `event`, and wrap the result.
pub(crate) async fn run_event(
    state: &AppState,
    handle: &SessionHandle,
    event: Event,
) -> Result<Json<ApiResponse<ActionView>>, AppError> {
    let start = Instant::now();
    let kind = event.kind();
    let mut session = handle.session.lock().await;
    let outcome = state.controller.dispatch(&mut session, event).await?;
    debug!(
        session_id = %handle.session_id,
        event = %kind,
        page = %session.page,
        "Event dispatched"
    );
    let view = ActionView {
        outcome,
        session: SessionView::of(&session),
    };
    Ok(ApiResponse::success(view, start).json())
}
