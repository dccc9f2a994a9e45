//! Transcript endpoints scoped to the caller's agent folder.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use stayon_core::controller::Event;

use super::{ActionView, run_event};
use crate::http::error::AppError;
use crate::http::extractors::session::SessionHandle;
use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
}

/// GET /api/v1/session/transcripts?search= - List saved transcripts.
pub async fn list_transcripts(
    State(state): State<AppState>,
    handle: SessionHandle,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<ActionView>>, AppError> {
    run_event(
        &state,
        &handle,
        Event::ListTranscripts {
            search: query.search,
        },
    )
    .await
}

/// POST /api/v1/session/transcripts - Save the current case.
pub async fn save_transcript(
    State(state): State<AppState>,
    handle: SessionHandle,
) -> Result<Json<ApiResponse<ActionView>>, AppError> {
    run_event(&state, &handle, Event::SaveTranscript).await
}

/// POST /api/v1/session/transcripts/{file}/load - Restore a saved case.
pub async fn load_transcript(
    State(state): State<AppState>,
    handle: SessionHandle,
    Path(filename): Path<String>,
) -> Result<Json<ApiResponse<ActionView>>, AppError> {
    run_event(&state, &handle, Event::LoadTranscript { filename }).await
}

/// DELETE /api/v1/session/transcripts/{file} - Delete a saved case.
pub async fn delete_transcript(
    State(state): State<AppState>,
    handle: SessionHandle,
    Path(filename): Path<String>,
) -> Result<Json<ApiResponse<ActionView>>, AppError> {
    run_event(&state, &handle, Event::DeleteTranscript { filename }).await
}
