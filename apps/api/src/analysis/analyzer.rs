use serde::{Deserialize, Serialize};

use crate::llm_client::{ChatMessage, CompletionClient, CompletionRequest, LlmError};

pub const ANALYZE_TEMPERATURE: f64 = 0.7;
pub const ANALYZE_MAX_TOKENS: u32 = 500;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    /// Raw model text; `null` when the model produced no content.
    pub result: Option<String>,
}

/// Sends `prompt` as the only user turn and returns the reply verbatim.
pub async fn analyze(prompt: &str, llm: &dyn CompletionClient) -> Result<Option<String>, LlmError> {
    let request = CompletionRequest::new(
        vec![ChatMessage::user(prompt)],
        ANALYZE_TEMPERATURE,
        ANALYZE_MAX_TOKENS,
    )?;

    llm.complete(&request).await
}
