//! LlmProvider trait definition.
//!
//! The single seam between the gateway and a concrete text-generation
//! backend. Implementations live in stayon-infra (e.g. `OpenAiCompatibleProvider`).

use stayon_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for LLM provider backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). Wrap an
/// implementation in [`BoxLlmProvider`](super::box_provider::BoxLlmProvider)
/// when the concrete type is chosen at runtime.
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai", "gemini").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
