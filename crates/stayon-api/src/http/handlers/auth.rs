//! Login endpoint.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use stayon_core::controller::Event;
use stayon_types::session::Session;

use super::SessionView;
use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub session_id: String,
    pub session: SessionView,
}

/// POST /api/v1/login - Start a session for an agent.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let start = Instant::now();

    let mut session = Session::new();
    state
        .controller
        .dispatch(
            &mut session,
            Event::Login {
                name: req.name,
                code: req.code,
            },
        )
        .await?;

    let session_id = session.session_id.clone();
    let view = SessionView::of(&session);
    state.insert_session(session_id.clone(), session);

    let resp = ApiResponse::success(LoginResponse { session_id, session: view }, start)
        .with_link("session", "/api/v1/session");
    Ok(resp.json())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::test_state;
    use stayon_types::session::Page;
    use tempfile::TempDir;

    #[tokio::test]
    async fn login_registers_session() {
        let tmp = TempDir::new().unwrap();
        let state = test_state(tmp.path(), &[]);

        let Json(resp) = login(
            State(state.clone()),
            Json(LoginRequest {
                name: "kim".to_string(),
                code: "1234".to_string(),
            }),
        )
        .await
        .unwrap();

        let data = resp.data.unwrap();
        assert!(!data.session_id.contains("kim"));
        assert_eq!(data.session.session.page, Page::Input);
        assert_eq!(data.session.session.user_folder, "kim_1234");
        assert!(state.touch_session(&data.session_id).is_some());
    }

    #[tokio::test]
    async fn bad_code_is_rejected_and_not_registered() {
        let tmp = TempDir::new().unwrap();
        let state = test_state(tmp.path(), &[]);

        let err = login(
            State(state.clone()),
            Json(LoginRequest {
                name: "kim".to_string(),
                code: "12a4".to_string(),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.parts().0, axum::http::StatusCode::BAD_REQUEST);
        assert!(state.sessions.is_empty());
    }
}
