//! Scripted provider shared by the gateway and controller tests.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex};

use stayon_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, StopReason, Usage,
};

use super::provider::LlmProvider;

#[derive(Clone)]
pub(crate) enum MockResult {
    Success(String),
    Error(MockError),
}

#[derive(Clone)]
pub(crate) enum MockError {
    Provider(String),
    Auth,
}

/// Replies are popped in order; once the queue is empty every call fails.
#[derive(Clone, Default)]
pub(crate) struct MockProvider {
    replies: Arc<Mutex<VecDeque<MockResult>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockProvider {
    pub(crate) fn with(results: impl IntoIterator<Item = MockResult>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(results.into_iter().collect())),
            requests: Arc::default(),
        }
    }

    pub(crate) fn replying(texts: &[&str]) -> Self {
        Self::with(texts.iter().map(|t| MockResult::Success(t.to_string())))
    }

    pub(crate) fn failing() -> Self {
        Self::with([MockResult::Error(MockError::Provider("connection reset".into()))])
    }

    pub(crate) fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl Future<Output = Result<CompletionResponse, LlmError>> + Send {
        self.requests.lock().unwrap().push(request.clone());
        let next = self.replies.lock().unwrap().pop_front();
        let model = request.model.clone();
        async move {
            match next {
                Some(MockResult::Success(content)) => Ok(CompletionResponse {
                    id: "resp-mock".to_string(),
                    content,
                    model,
                    stop_reason: StopReason::EndTurn,
                    usage: Usage {
                        input_tokens: 10,
                        output_tokens: 20,
                    },
                }),
                Some(MockResult::Error(MockError::Provider(message))) => {
                    Err(LlmError::Provider { message })
                }
                Some(MockResult::Error(MockError::Auth)) => Err(LlmError::AuthenticationFailed),
                None => Err(LlmError::Provider {
                    message: "no scripted reply left".to_string(),
                }),
            }
        }
    }
}
