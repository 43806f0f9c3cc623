//! In-memory `CompletionClient` for handler and router tests.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{CompletionClient, CompletionRequest, LlmError};

/// Replays a canned reply (or provider error) and records every request it sees.
pub struct StubCompletionClient {
    reply: Result<Option<String>, String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl StubCompletionClient {
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_reply(Ok(Some(text.into())))
    }

    pub fn replying_nothing() -> Self {
        Self::with_reply(Ok(None))
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_reply(Err(message.into()))
    }

    fn with_reply(reply: Result<Option<String>, String>) -> Self {
        Self {
            reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The single request the handler under test made.
    pub fn only_request(&self) -> CompletionRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one completion call");
        requests.into_iter().next().unwrap()
    }
}

#[async_trait]
impl CompletionClient for StubCompletionClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Ok(reply) => Ok(reply.clone()),
            Err(message) => Err(LlmError::Api {
                status: 401,
                message: message.clone(),
            }),
        }
    }

    fn model(&self) -> &str {
        "stub"
    }
}
