//! LLM gateway: one place where prompts meet the provider.
//!
//! `LlmGateway::generate` builds a request from a system prompt, the stored
//! history for a key, and the new user input. Provider errors never escape:
//! they are folded into [`Generation::Failed`], logged, and leave history
//! untouched.

use tracing::{Instrument, debug, error, info_span};

use stayon_types::chat::ChatTurn;
use stayon_types::config::LlmSettings;
use stayon_types::llm::{CompletionRequest, FailureKind, Message, MessageRole};

use super::box_provider::BoxLlmProvider;
use crate::session::store::HistoryStore;

/// Shown to the agent whenever a generation fails.
pub const FALLBACK_REPLY: &str =
    "Sorry, a response could not be generated right now. Please try again, or contact your administrator if this keeps happening.";

/// Result of a gateway call. Never an `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    Text(String),
    Failed { kind: FailureKind, detail: String },
}

impl Generation {
    /// Text to show the agent: the model output, or [`FALLBACK_REPLY`].
    pub fn text(&self) -> &str {
        match self {
            Generation::Text(text) => text,
            Generation::Failed { .. } => FALLBACK_REPLY,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Generation::Failed { .. })
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Generation::Text(_) => None,
            Generation::Failed { kind, .. } => Some(*kind),
        }
    }
}

/// Model parameters fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: Option<f64>,
}

impl From<&LlmSettings> for GenerationSettings {
    fn from(settings: &LlmSettings) -> Self {
        Self {
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
            temperature: Some(settings.temperature),
        }
    }
}

pub struct LlmGateway {
    provider: BoxLlmProvider,
    history: HistoryStore,
    settings: GenerationSettings,
}

impl LlmGateway {
    pub fn new(provider: BoxLlmProvider, history: HistoryStore, settings: GenerationSettings) -> Self {
        Self {
            provider,
            history,
            settings,
        }
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Generate a reply in the conversation stored under `history_key`.
    ///
    /// On success the user input and the reply are appended to that history.
    pub async fn generate(&self, system_prompt: &str, history_key: &str, new_input: &str) -> Generation {
        let mut messages: Vec<Message> = self
            .history
            .get_history(history_key)
            .iter()
            .map(ChatTurn::to_message)
            .collect();
        messages.push(Message {
            role: MessageRole::User,
            content: new_input.to_string(),
        });

        let generation = self.complete(system_prompt, messages, Some(history_key)).await;
        if let Generation::Text(reply) = &generation {
            self.history.append(
                history_key,
                [ChatTurn::user(new_input), ChatTurn::assistant(reply.clone())],
            );
        }
        generation
    }

    /// One-shot generation that neither reads nor writes any history.
    pub async fn generate_detached(&self, system_prompt: &str, input: &str) -> Generation {
        let messages = vec![Message {
            role: MessageRole::User,
            content: input.to_string(),
        }];
        self.complete(system_prompt, messages, None).await
    }

    async fn complete(
        &self,
        system_prompt: &str,
        messages: Vec<Message>,
        history_key: Option<&str>,
    ) -> Generation {
        let request = CompletionRequest {
            model: self.settings.model.clone(),
            messages,
            system: Some(system_prompt.to_string()),
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        let span = info_span!(
            "gen_ai.complete",
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
            history_key = history_key.unwrap_or("-"),
            turns = request.messages.len(),
        );

        match self.provider.complete(&request).instrument(span).await {
            Ok(response) if response.content.trim().is_empty() => {
                error!(
                    provider = self.provider.name(),
                    model = %response.model,
                    history_key = history_key.unwrap_or("-"),
                    "Model returned an empty reply"
                );
                Generation::Failed {
                    kind: FailureKind::EmptyResponse,
                    detail: "model returned an empty reply".to_string(),
                }
            }
            Ok(response) => {
                debug!(
                    model = %response.model,
                    input_tokens = response.usage.input_tokens,
                    output_tokens = response.usage.output_tokens,
                    stop_reason = %response.stop_reason,
                    "Generation complete"
                );
                Generation::Text(response.content)
            }
            Err(err) => {
                error!(
                    provider = self.provider.name(),
                    history_key = history_key.unwrap_or("-"),
                    error = %err,
                    "Generation failed"
                );
                Generation::Failed {
                    kind: FailureKind::from(&err),
                    detail: err.to_string(),
                }
            }
        }
    }
}
