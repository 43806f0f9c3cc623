//! CV → career-history JSON via one completion call.

use tracing::warn;

use crate::career::models::CareerInfo;
use crate::career::prompts::{
    CAREER_EXTRACT_MAX_TOKENS, CAREER_EXTRACT_SYSTEM, CAREER_EXTRACT_TEMPERATURE,
};
use crate::llm_client::recovery::{parse_reply, ReplyJson};
use crate::llm_client::{ChatMessage, CompletionClient, CompletionRequest, LlmError};

/// Characters of CV text forwarded to the model; the rest is dropped silently.
pub const MAX_CV_CHARS: usize = 4000;

/// Returns the first `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Serialized `CareerInfo::default()`, returned whenever the reply is not usable JSON.
pub fn fallback_career_json() -> String {
    serde_json::to_string(&CareerInfo::default()).unwrap_or_else(|_| "{}".to_string())
}

/// Extracts career information from CV text and returns it as JSON text.
///
/// Provider failures propagate. A reply that is empty or not valid JSON after
/// fence stripping is replaced by the fallback document.
pub async fn extract_career(cv_text: &str, llm: &dyn CompletionClient) -> Result<String, LlmError> {
    let request = CompletionRequest::new(
        vec![
            ChatMessage::system(CAREER_EXTRACT_SYSTEM),
            ChatMessage::user(truncate_chars(cv_text, MAX_CV_CHARS)),
        ],
        CAREER_EXTRACT_TEMPERATURE,
        CAREER_EXTRACT_MAX_TOKENS,
    )?;

    let reply = llm.complete(&request).await?;

    Ok(match parse_reply(reply.as_deref()) {
        ReplyJson::Parsed { value, text } => {
            if let Err(e) = serde_json::from_value::<CareerInfo>(value) {
                warn!("Career reply does not match the requested schema: {e}");
            }
            text
        }
        ReplyJson::Unparsable(text) => {
            warn!(
                "Career reply is not valid JSON ({} chars), using fallback",
                text.len()
            );
            fallback_career_json()
        }
        ReplyJson::Empty => {
            warn!("Career reply was empty, using fallback");
            fallback_career_json()
        }
    })
}
