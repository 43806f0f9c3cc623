use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup and never mutated.
#[derive(Clone)]
pub struct AppState {
    /// Completion backend. `OpenAiClient` in production, a stub in tests.
    pub llm: Arc<dyn CompletionClient>,
    pub config: Config,
}

impl AppState {
    pub fn new(llm: Arc<dyn CompletionClient>, config: Config) -> Self {
        Self { llm, config }
    }
}
