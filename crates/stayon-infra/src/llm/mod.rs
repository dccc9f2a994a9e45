//! LLM provider implementations.
//!
//! Every supported backend speaks the OpenAI chat completions protocol, so a
//! single [`OpenAiCompatibleProvider`] covers them all. [`create_provider`]
//! builds it from [`LlmSettings`]; [`test_provider_connection`] checks that a
//! key and endpoint actually answer.

pub mod openai_compat;

use secrecy::SecretString;

use stayon_core::llm::box_provider::BoxLlmProvider;
use stayon_types::config::LlmSettings;
use stayon_types::llm::{CompletionRequest, LlmError, Message, MessageRole};

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::{self as presets, OpenAiCompatConfig};

/// Create a [`BoxLlmProvider`] from the `[llm]` config section.
///
/// An explicit `base_url` wins. Otherwise the provider name selects a preset,
/// and unknown names fall back to the OpenAI endpoint.
pub fn create_provider(
    settings: &LlmSettings,
    api_key: SecretString,
) -> Result<BoxLlmProvider, LlmError> {
    if settings.model.trim().is_empty() {
        return Err(LlmError::InvalidRequest("llm.model is empty".to_string()));
    }

    let config = match settings.base_url.as_deref() {
        Some(base_url) => OpenAiCompatConfig {
            provider_name: settings.provider.clone(),
            base_url: base_url.to_string(),
            api_key,
            model: settings.model.clone(),
        },
        None => match settings.provider.as_str() {
            "gemini" => presets::gemini_defaults(api_key, &settings.model),
            "mistral" => presets::mistral_defaults(api_key, &settings.model),
            "openai" => presets::openai_defaults(api_key, &settings.model),
            other => {
                tracing::warn!(
                    provider = other,
                    "Unknown provider without base_url, using the OpenAI endpoint"
                );
                OpenAiCompatConfig {
                    provider_name: other.to_string(),
                    ..presets::openai_defaults(api_key, &settings.model)
                }
            }
        },
    };

    Ok(BoxLlmProvider::new(OpenAiCompatibleProvider::new(config)))
}

/// Send a minimal completion request to verify the key and endpoint.
pub async fn test_provider_connection(provider: &BoxLlmProvider) -> Result<(), LlmError> {
    let request = CompletionRequest {
        model: String::new(), // Provider uses its configured default
        messages: vec![Message {
            role: MessageRole::User,
            content: "Hello".to_string(),
        }],
        system: None,
        max_tokens: 10,
        temperature: Some(0.0),
    };
    provider.complete(&request).await?;
    Ok(())
}
