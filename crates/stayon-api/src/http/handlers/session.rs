//! Case workflow endpoints: everything an agent does between login and logout.

use std::collections::BTreeSet;
use std::time::Instant;

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use stayon_core::controller::{CaseInput, Event};
use stayon_types::retention::{EmphasisTopic, UrgencyTier};

use super::{ActionView, SessionView, run_event};
use crate::http::error::AppError;
use crate::http::extractors::session::SessionHandle;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Intake form body. Tier and topics arrive as strings and are parsed
/// leniently so labels and short names both work.
#[derive(Debug, Deserialize)]
pub struct ScriptRequest {
    pub customer_name: String,
    pub situation_text: String,
    pub urgency_tier: String,
    #[serde(default)]
    pub emphasis_topics: Vec<String>,
}

impl ScriptRequest {
    fn into_case_input(self) -> Result<CaseInput, AppError> {
        let urgency_tier: UrgencyTier = self.urgency_tier.parse().map_err(AppError::Validation)?;
        let emphasis_topics = self
            .emphasis_topics
            .iter()
            .map(|t| t.parse::<EmphasisTopic>())
            .collect::<Result<BTreeSet<_>, _>>()
            .map_err(AppError::Validation)?;
        Ok(CaseInput {
            customer_name: self.customer_name,
            situation_text: self.situation_text,
            urgency_tier,
            emphasis_topics,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    pub question: String,
}

/// GET /api/v1/session - Current session state.
pub async fn get_session(handle: SessionHandle) -> Json<ApiResponse<SessionView>> {
    let start = Instant::now();
    let session = handle.session.lock().await;
    ApiResponse::success(SessionView::of(&session), start).json()
}

/// POST /api/v1/session/scenario - Draft a random practice case.
pub async fn generate_scenario(
    State(state): State<AppState>,
    handle: SessionHandle,
) -> Result<Json<ApiResponse<ActionView>>, AppError> {
    run_event(&state, &handle, Event::GenerateScenario).await
}

/// POST /api/v1/session/script - Submit the intake form and generate a script.
pub async fn submit_case(
    State(state): State<AppState>,
    handle: SessionHandle,
    Json(req): Json<ScriptRequest>,
) -> Result<Json<ApiResponse<ActionView>>, AppError> {
    let input = req.into_case_input()?;
    run_event(&state, &handle, Event::SubmitCase(input)).await
}

/// POST /api/v1/session/messages - Ask a follow-up question.
pub async fn ask_follow_up(
    State(state): State<AppState>,
    handle: SessionHandle,
    Json(req): Json<QuestionRequest>,
) -> Result<Json<ApiResponse<ActionView>>, AppError> {
    run_event(
        &state,
        &handle,
        Event::AskFollowUp {
            question: req.question,
        },
    )
    .await
}

/// POST /api/v1/session/outbound - Draft outbound text messages.
pub async fn generate_outbound(
    State(state): State<AppState>,
    handle: SessionHandle,
) -> Result<Json<ApiResponse<ActionView>>, AppError> {
    run_event(&state, &handle, Event::GenerateOutbound).await
}

/// POST /api/v1/session/new-case - Clear the case and return to intake.
pub async fn new_case(
    State(state): State<AppState>,
    handle: SessionHandle,
) -> Result<Json<ApiResponse<ActionView>>, AppError> {
    run_event(&state, &handle, Event::NewCase).await
}

/// POST /api/v1/session/logout - End the session.
pub async fn logout(
    State(state): State<AppState>,
    handle: SessionHandle,
) -> Result<Json<ApiResponse<ActionView>>, AppError> {
    let resp = run_event(&state, &handle, Event::Logout).await?;
    state.remove_session(&handle.session_id);
    Ok(resp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::{logged_in, test_state};
    use stayon_core::controller::Outcome;
    use stayon_types::session::Page;
    use tempfile::TempDir;

    fn script_request(tier: &str, topics: &[&str]) -> ScriptRequest {
        ScriptRequest {
            customer_name: "Hong".to_string(),
            situation_text: "A friend's agency offered a cheaper plan".to_string(),
            urgency_tier: tier.to_string(),
            emphasis_topics: topics.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn script_request_parses_tier_and_topics() {
        let input = script_request("high/very firm", &["brand_trust"])
            .into_case_input()
            .unwrap();
        assert_eq!(input.urgency_tier, UrgencyTier::High);
        assert!(input.emphasis_topics.contains(&EmphasisTopic::BrandTrust));
    }

    #[test]
    fn script_request_rejects_unknown_topic() {
        let err = script_request("low", &["free_lunch"])
            .into_case_input()
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn submit_then_ask() {
        let tmp = TempDir::new().unwrap();
        let state = test_state(tmp.path(), &["SCRIPT", "Try acknowledging the price concern."]);
        let handle = logged_in(&state).await;

        let Json(resp) = submit_case(
            State(state.clone()),
            handle.clone(),
            Json(script_request("medium", &[])),
        )
        .await
        .unwrap();
        let data = resp.data.unwrap();
        assert_eq!(
            data.outcome,
            Outcome::ScriptReady {
                script: "SCRIPT".to_string()
            }
        );
        assert_eq!(data.session.session.page, Page::Chatbot);

        let Json(resp) = ask_follow_up(
            State(state.clone()),
            handle.clone(),
            Json(QuestionRequest {
                question: "They say it's too expensive".to_string(),
            }),
        )
        .await
        .unwrap();
        let data = resp.data.unwrap();
        assert!(matches!(data.outcome, Outcome::Reply { .. }));
        assert_eq!(data.session.session.messages.len(), 3);
    }

    #[tokio::test]
    async fn outbound_on_input_page_conflicts() {
        let tmp = TempDir::new().unwrap();
        let state = test_state(tmp.path(), &[]);
        let handle = logged_in(&state).await;

        let err = generate_outbound(State(state.clone()), handle).await.unwrap_err();
        assert_eq!(err.parts().0, axum::http::StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn logout_forgets_session() {
        let tmp = TempDir::new().unwrap();
        let state = test_state(tmp.path(), &[]);
        let handle = logged_in(&state).await;
        let id = handle.session_id.clone();

        let Json(resp) = logout(State(state.clone()), handle).await.unwrap();
        let data = resp.data.unwrap();
        assert_eq!(data.outcome, Outcome::LoggedOut);
        assert_eq!(data.session.session.page, Page::Login);
        assert!(state.touch_session(&id).is_none());
    }
}
