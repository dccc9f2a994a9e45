//! Event dispatch over a single session.
//!
//! `CaseController::dispatch` checks the page transition first, then runs the
//! action. Validation errors and invalid transitions leave the session as it
//! was. A failed generation is not an error: it comes back as
//! [`Outcome::GenerationFailed`] and the page does not advance.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{FixedOffset, Offset, Utc};
use serde::Serialize;
use tracing::{info, warn};

use stayon_types::chat::ChatTurn;
use stayon_types::error::ControllerError;
use stayon_types::llm::FailureKind;
use stayon_types::retention::{EmphasisTopic, ScenarioDraft, UrgencyTier};
use stayon_types::session::Session;
use stayon_types::transcript::{DeleteOutcome, TranscriptFormat};

use super::page::{EventKind, transition};
use crate::llm::gateway::{FALLBACK_REPLY, Generation, LlmGateway};
use crate::prompt::follow_up::{FOLLOW_UP_SYSTEM_PROMPT, follow_up_input};
use crate::prompt::format::tidy_reply;
use crate::prompt::outbound::{OUTBOUND_REQUEST, outbound_prompt, summarize_conversation};
use crate::prompt::scenario::{RANDOM_SCENARIO_REQUEST, RANDOM_SCENARIO_SYSTEM_PROMPT, parse_scenario};
use crate::prompt::script::{ScriptPromptBuilder, ScriptPromptConfig};
use crate::session::{SessionExt, start_session};
use crate::transcript::codec;
use crate::transcript::repository::TranscriptRepository;

/// Intake form contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseInput {
    pub customer_name: String,
    pub situation_text: String,
    pub urgency_tier: UrgencyTier,
    pub emphasis_topics: BTreeSet<EmphasisTopic>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Login { name: String, code: String },
    GenerateScenario,
    SubmitCase(CaseInput),
    AskFollowUp { question: String },
    GenerateOutbound,
    SaveTranscript,
    ListTranscripts { search: Option<String> },
    LoadTranscript { filename: String },
    DeleteTranscript { filename: String },
    NewCase,
    Logout,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Login { .. } => EventKind::Login,
            Event::GenerateScenario => EventKind::GenerateScenario,
            Event::SubmitCase(_) => EventKind::SubmitCase,
            Event::AskFollowUp { .. } => EventKind::AskFollowUp,
            Event::GenerateOutbound => EventKind::GenerateOutbound,
            Event::SaveTranscript => EventKind::SaveTranscript,
            Event::ListTranscripts { .. } => EventKind::ListTranscripts,
            Event::LoadTranscript { .. } => EventKind::LoadTranscript,
            Event::DeleteTranscript { .. } => EventKind::DeleteTranscript,
            Event::NewCase => EventKind::NewCase,
            Event::Logout => EventKind::Logout,
        }
    }
}

/// What an event produced, for the caller to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Outcome {
    LoggedIn { session_id: String },
    Scenario { draft: ScenarioDraft },
    ScriptReady { script: String },
    Reply { reply: String },
    OutboundReady { text: String },
    Saved { filename: String },
    Transcripts { files: Vec<String> },
    Loaded { filename: String, format: TranscriptFormat },
    Deleted { filename: String, outcome: DeleteOutcome },
    CaseCleared,
    LoggedOut,
    /// The model call failed; `message` is safe to show the agent.
    GenerationFailed { kind: FailureKind, message: String },
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::GenerationFailed { .. })
    }

    fn failed(kind: FailureKind) -> Self {
        Outcome::GenerationFailed {
            kind,
            message: FALLBACK_REPLY.to_string(),
        }
    }
}

/// Fixed offset for `hours` east of UTC, or UTC if out of range.
pub fn fixed_offset(hours: i32) -> FixedOffset {
    hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| {
            warn!(hours, "UTC offset out of range, using UTC");
            Utc.fix()
        })
}

/// Drives one session through the retention workflow.
pub struct CaseController<R: TranscriptRepository> {
    gateway: Arc<LlmGateway>,
    transcripts: Arc<R>,
    utc_offset: FixedOffset,
}

impl<R: TranscriptRepository> CaseController<R> {
    pub fn new(gateway: Arc<LlmGateway>, transcripts: Arc<R>, utc_offset: FixedOffset) -> Self {
        Self {
            gateway,
            transcripts,
            utc_offset,
        }
    }

    pub fn gateway(&self) -> &LlmGateway {
        &self.gateway
    }

    pub fn transcripts(&self) -> &R {
        &self.transcripts
    }

    pub async fn dispatch(
        &self,
        session: &mut Session,
        event: Event,
    ) -> Result<Outcome, ControllerError> {
        let kind = event.kind();
        let next = transition(session.page, kind).ok_or_else(|| {
            ControllerError::InvalidTransition {
                page: session.page,
                event: kind.to_string(),
            }
        })?;

        let outcome = match event {
            Event::Login { name, code } => Self::login(session, &name, &code)?,
            Event::GenerateScenario => self.generate_scenario(session).await,
            Event::SubmitCase(input) => self.submit_case(session, input).await?,
            Event::AskFollowUp { question } => self.ask_follow_up(session, &question).await?,
            Event::GenerateOutbound => self.generate_outbound(session).await?,
            Event::SaveTranscript => self.save_transcript(session).await?,
            Event::ListTranscripts { search } => {
                self.list_transcripts(session, search.as_deref()).await?
            }
            Event::LoadTranscript { filename } => self.load_transcript(session, &filename).await?,
            Event::DeleteTranscript { filename } => {
                self.delete_transcript(session, &filename).await?
            }
            Event::NewCase => self.new_case(session),
            Event::Logout => self.logout(session),
        };

        if !outcome.is_failure() {
            session.page = next;
        }
        Ok(outcome)
    }

    fn login(session: &mut Session, name: &str, code: &str) -> Result<Outcome, ControllerError> {
        let name = name.trim();
        let code = code.trim();
        if name.is_empty() || code.is_empty() {
            return Err(ControllerError::Validation(
                "Enter both your name and your 4-digit code.".to_string(),
            ));
        }
        if codec::validate_path_segment(name).is_err() {
            return Err(ControllerError::Validation(
                "Name must not contain path characters.".to_string(),
            ));
        }
        if code.len() != 4 || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(ControllerError::Validation(
                "The code must be exactly 4 digits.".to_string(),
            ));
        }

        *session = start_session(name, code);
        info!(
            session_id = %session.session_id,
            agent = %session.agent_name,
            user_folder = %session.user_folder,
            "Agent logged in"
        );
        Ok(Outcome::LoggedIn {
            session_id: session.session_id.clone(),
        })
    }

    async fn generate_scenario(&self, session: &mut Session) -> Outcome {
        let generation = self
            .gateway
            .generate_detached(RANDOM_SCENARIO_SYSTEM_PROMPT, RANDOM_SCENARIO_REQUEST)
            .await;

        let text = match generation {
            Generation::Text(text) => text,
            Generation::Failed { kind, .. } => return Outcome::failed(kind),
        };

        match parse_scenario(&text) {
            Some(draft) => {
                session.customer_name = draft.customer_name.clone();
                session.situation_text = draft.situation_text.clone();
                session.urgency_tier = Some(draft.urgency_tier);
                Outcome::Scenario { draft }
            }
            None => {
                warn!(session_id = %session.session_id, reply = %text, "Could not parse generated scenario");
                Outcome::failed(FailureKind::Unparseable)
            }
        }
    }

    async fn submit_case(
        &self,
        session: &mut Session,
        input: CaseInput,
    ) -> Result<Outcome, ControllerError> {
        if input.customer_name.trim().is_empty() || input.situation_text.trim().is_empty() {
            return Err(ControllerError::Validation(
                "Enter both the customer name and the cancellation request.".to_string(),
            ));
        }

        let config = ScriptPromptConfig {
            customer_name: input.customer_name.trim().to_string(),
            situation_text: input.situation_text.trim().to_string(),
            urgency_tier: input.urgency_tier,
            agent_name: session.agent_name.clone(),
            emphasis_topics: input.emphasis_topics,
        };

        session.customer_name = config.customer_name.clone();
        session.situation_text = config.situation_text.clone();
        session.urgency_tier = Some(config.urgency_tier);
        session.emphasis_topics = config.emphasis_topics.clone();
        session.outbound_message_text.clear();
        session.current_file = None;
        session.script_text.clear();
        session.messages.clear();

        self.gateway.history().reset_history(session.history_key());
        let generation = self
            .gateway
            .generate(
                &ScriptPromptBuilder::build(&config),
                session.history_key(),
                &config.customer_facts(),
            )
            .await;

        match generation {
            Generation::Text(script) => {
                info!(
                    session_id = %session.session_id,
                    tier = %config.urgency_tier,
                    topics = config.emphasis_topics.len(),
                    "Retention script generated"
                );
                session.script_text = script.clone();
                session.messages = vec![ChatTurn::assistant(script.clone())];
                Ok(Outcome::ScriptReady { script })
            }
            Generation::Failed { kind, .. } => Ok(Outcome::failed(kind)),
        }
    }

    async fn ask_follow_up(
        &self,
        session: &mut Session,
        question: &str,
    ) -> Result<Outcome, ControllerError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ControllerError::Validation("Enter a question.".to_string()));
        }

        session.messages.push(ChatTurn::user(question));
        let input = follow_up_input(&session.script_text, question);
        let generation = self
            .gateway
            .generate(&FOLLOW_UP_SYSTEM_PROMPT, session.history_key(), &input)
            .await;

        match generation {
            Generation::Text(reply) => {
                let reply = tidy_reply(&reply);
                session.messages.push(ChatTurn::assistant(reply.clone()));
                Ok(Outcome::Reply { reply })
            }
            Generation::Failed { kind, .. } => {
                session.messages.pop();
                Ok(Outcome::failed(kind))
            }
        }
    }

    async fn generate_outbound(&self, session: &mut Session) -> Result<Outcome, ControllerError> {
        if session.script_text.trim().is_empty() {
            return Err(ControllerError::Validation(
                "There is no call script yet. Generate a script first.".to_string(),
            ));
        }

        let summary = summarize_conversation(&session.messages);
        let prompt = outbound_prompt(&session.script_text, &summary);
        let generation = self
            .gateway
            .generate(&prompt, &session.outbound_history_key(), OUTBOUND_REQUEST)
            .await;

        match generation {
            Generation::Text(text) => {
                session.outbound_message_text = text.clone();
                Ok(Outcome::OutboundReady { text })
            }
            Generation::Failed { kind, .. } => Ok(Outcome::failed(kind)),
        }
    }

    async fn save_transcript(&self, session: &mut Session) -> Result<Outcome, ControllerError> {
        if session.messages.is_empty() {
            return Err(ControllerError::Validation(
                "There is no conversation to save.".to_string(),
            ));
        }

        let now = Utc::now().with_timezone(&self.utc_offset);
        let filename = self
            .transcripts
            .save(
                &session.user_folder,
                session.current_file.as_deref(),
                &session.to_transcript(),
                now,
            )
            .await?;

        info!(
            session_id = %session.session_id,
            file = %filename,
            replaced = ?session.current_file,
            "Transcript saved"
        );
        session.current_file = Some(filename.clone());
        Ok(Outcome::Saved { filename })
    }

    async fn list_transcripts(
        &self,
        session: &Session,
        search: Option<&str>,
    ) -> Result<Outcome, ControllerError> {
        let files = self.transcripts.list(&session.user_folder).await?;
        let files = match search {
            Some(keyword) => codec::search(&files, keyword),
            None => files,
        };
        Ok(Outcome::Transcripts { files })
    }

    async fn load_transcript(
        &self,
        session: &mut Session,
        filename: &str,
    ) -> Result<Outcome, ControllerError> {
        codec::validate_filename(filename)?;
        let loaded = self.transcripts.load(&session.user_folder, filename).await?;

        session.apply_transcript(&loaded);
        let history = self.gateway.history();
        history.replace_history(session.history_key(), session.messages.clone());
        history.reset_history(&session.outbound_history_key());

        info!(
            session_id = %session.session_id,
            file = %filename,
            format = ?loaded.format,
            messages = session.messages.len(),
            "Transcript loaded"
        );
        Ok(Outcome::Loaded {
            filename: loaded.filename,
            format: loaded.format,
        })
    }

    async fn delete_transcript(
        &self,
        session: &mut Session,
        filename: &str,
    ) -> Result<Outcome, ControllerError> {
        codec::validate_filename(filename)?;
        let outcome = self.transcripts.delete(&session.user_folder, filename).await?;

        if session.current_file.as_deref() == Some(filename) {
            session.current_file = None;
        }
        match outcome {
            DeleteOutcome::Deleted => {
                info!(session_id = %session.session_id, file = %filename, "Transcript deleted")
            }
            DeleteOutcome::AlreadyDeleted => {
                warn!(session_id = %session.session_id, file = %filename, "Transcript was already deleted")
            }
        }
        Ok(Outcome::Deleted {
            filename: filename.to_string(),
            outcome,
        })
    }

    fn new_case(&self, session: &mut Session) -> Outcome {
        session.clear_case();
        let history = self.gateway.history();
        history.reset_history(session.history_key());
        history.reset_history(&session.outbound_history_key());
        Outcome::CaseCleared
    }

    fn logout(&self, session: &mut Session) -> Outcome {
        session.messages.clear();
        let history = self.gateway.history();
        history.remove(session.history_key());
        history.remove(&session.outbound_history_key());
        info!(session_id = %session.session_id, "Agent logged out");
        Outcome::LoggedOut
    }
}
