/// Completion client: the single point of entry for all chat-completion calls.
///
/// Handlers depend on the `CompletionClient` trait only; `OpenAiClient` is the
/// production backend. One request per call, no retries.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod recovery;
#[cfg(test)]
pub mod stub;

pub const MAX_TEMPERATURE: f64 = 2.0;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Could not decode provider response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Provider returned no choices")]
    NoChoices,

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("Invalid completion request: {0}")]
    InvalidRequest(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A validated chat-completion request: ordered messages, sampling temperature
/// in `[0, 2]` and a positive output token cap.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
}

impl CompletionRequest {
    pub fn new(
        messages: Vec<ChatMessage>,
        temperature: f64,
        max_tokens: u32,
    ) -> Result<Self, LlmError> {
        if messages.is_empty() {
            return Err(LlmError::InvalidRequest(
                "at least one message is required".to_string(),
            ));
        }
        if !(0.0..=MAX_TEMPERATURE).contains(&temperature) {
            return Err(LlmError::InvalidRequest(format!(
                "temperature {temperature} is outside [0, {MAX_TEMPERATURE}]"
            )));
        }
        if max_tokens == 0 {
            return Err(LlmError::InvalidRequest(
                "max_tokens must be positive".to_string(),
            ));
        }

        Ok(Self {
            messages,
            temperature,
            max_tokens,
        })
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }
}

#[cfg(test)]
impl CompletionRequest {
    /// Content of the last user turn, if any.
    pub fn user_content(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
    }
}

/// Backend-agnostic completion interface.
///
/// Carried in `AppState` as `Arc<dyn CompletionClient>`. Returns the first
/// choice's text, or `None` when the model produced no content.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, LlmError>;

    /// Model identifier, for logs.
    fn model(&self) -> &str;
}

// ────────────────────────────────────────────────────────────────────────────
// OpenAI-compatible backend
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

/// Chat-completion client for OpenAI-compatible providers.
/// Holds only credentials and connection settings; safe to share across requests.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, base_url: &str, model: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().build()?,
            api_key,
            endpoint: completions_endpoint(base_url),
            model,
        })
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, LlmError> {
        let body = ChatCompletionBody {
            model: &self.model,
            messages: request.messages(),
            temperature: request.temperature(),
            max_tokens: request.max_tokens(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: provider_error_message(&text),
            });
        }

        parse_completion(&text)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

fn completions_endpoint(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

/// Pulls `error.message` out of a provider error body, falling back to the raw body.
fn provider_error_message(body: &str) -> String {
    serde_json::from_str::<ProviderError>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}

fn parse_completion(body: &str) -> Result<Option<String>, LlmError> {
    let parsed: ChatCompletionResponse = serde_json::from_str(body)?;

    if let Some(usage) = &parsed.usage {
        debug!(
            "Completion succeeded: prompt_tokens={}, completion_tokens={}",
            usage.prompt_tokens, usage.completion_tokens
        );
    }

    parsed
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or(LlmError::NoChoices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_request() -> CompletionRequest {
        CompletionRequest::new(
            vec![ChatMessage::system("be terse"), ChatMessage::user("hi")],
            0.3,
            800,
        )
        .unwrap()
    }

    #[test]
    fn test_request_rejects_empty_messages() {
        let result = CompletionRequest::new(vec![], 0.7, 500);
        assert!(matches!(result, Err(LlmError::InvalidRequest(_))));
    }

    #[test]
    fn test_request_rejects_out_of_range_temperature() {
        let result = CompletionRequest::new(vec![ChatMessage::user("x")], 2.5, 500);
        assert!(matches!(result, Err(LlmError::InvalidRequest(_))));
        let result = CompletionRequest::new(vec![ChatMessage::user("x")], -0.1, 500);
        assert!(matches!(result, Err(LlmError::InvalidRequest(_))));
    }

    #[test]
    fn test_request_accepts_temperature_bounds() {
        assert!(CompletionRequest::new(vec![ChatMessage::user("x")], 0.0, 1).is_ok());
        assert!(CompletionRequest::new(vec![ChatMessage::user("x")], 2.0, 1).is_ok());
    }

    #[test]
    fn test_request_rejects_zero_max_tokens() {
        let result = CompletionRequest::new(vec![ChatMessage::user("x")], 0.7, 0);
        assert!(matches!(result, Err(LlmError::InvalidRequest(_))));
    }

    #[test]
    fn test_user_content_returns_last_user_turn() {
        assert_eq!(sample_request().user_content(), Some("hi"));
    }

    #[test]
    fn test_body_serializes_openai_shape() {
        let request = sample_request();
        let body = ChatCompletionBody {
            model: "gpt-3.5-turbo",
            messages: request.messages(),
            temperature: request.temperature(),
            max_tokens: request.max_tokens(),
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            json!({
                "model": "gpt-3.5-turbo",
                "messages": [
                    {"role": "system", "content": "be terse"},
                    {"role": "user", "content": "hi"}
                ],
                "temperature": 0.3,
                "max_tokens": 800
            })
        );
    }

    #[test]
    fn test_parse_completion_returns_first_choice() {
        let body = json!({
            "choices": [
                {"message": {"role": "assistant", "content": "first"}},
                {"message": {"role": "assistant", "content": "second"}}
            ],
            "usage": {"prompt_tokens": 10, "completion_tokens": 2, "total_tokens": 12}
        })
        .to_string();

        assert_eq!(parse_completion(&body).unwrap(), Some("first".to_string()));
    }

    #[test]
    fn test_parse_completion_null_content_is_none() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
        assert_eq!(parse_completion(body).unwrap(), None);
    }

    #[test]
    fn test_parse_completion_without_choices_fails() {
        let body = r#"{"choices":[]}"#;
        assert!(matches!(parse_completion(body), Err(LlmError::NoChoices)));
    }

    #[test]
    fn test_parse_completion_malformed_body_fails() {
        assert!(matches!(
            parse_completion("<html>bad gateway</html>"),
            Err(LlmError::Decode(_))
        ));
    }

    #[test]
    fn test_provider_error_message_extracts_nested_message() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
        assert_eq!(provider_error_message(body), "Incorrect API key provided");
    }

    #[test]
    fn test_provider_error_message_falls_back_to_raw_body() {
        assert_eq!(provider_error_message("upstream timeout"), "upstream timeout");
    }

    #[test]
    fn test_completions_endpoint_tolerates_trailing_slash() {
        assert_eq!(
            completions_endpoint("https://api.openai.com/v1/"),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_api_error_display_carries_provider_message() {
        let err = LlmError::Api {
            status: 429,
            message: "Rate limit reached".to_string(),
        };
        assert_eq!(err.to_string(), "API error (status 429): Rate limit reached");
    }
}
