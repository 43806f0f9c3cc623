//! Best-effort recovery of a JSON document from a model reply.
//!
//! Models tend to wrap JSON in markdown code fences even when told not to.
//! Fences are removed by plain substring deletion, then the remainder must
//! parse strictly. Prose around the JSON is not handled.

use serde_json::Value;

/// Outcome of running a model reply through fence stripping and a strict parse.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyJson {
    /// Cleaned text parsed as JSON. `text` is the cleaned text as sent by the model.
    Parsed { value: Value, text: String },
    /// Cleaned text that is not valid JSON.
    Unparsable(String),
    /// The model returned no content at all.
    Empty,
}

/// Removes every "```json" and then every "```" from `text`, wherever they
/// occur, and trims the result.
pub fn strip_json_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

pub fn parse_reply(reply: Option<&str>) -> ReplyJson {
    let Some(reply) = reply.filter(|r| !r.is_empty()) else {
        return ReplyJson::Empty;
    };

    let cleaned = strip_json_fences(reply);
    match serde_json::from_str::<Value>(&cleaned) {
        Ok(value) => ReplyJson::Parsed {
            value,
            text: cleaned,
        },
        Err(_) => ReplyJson::Unparsable(cleaned),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"a\":1}\n```";
        assert_eq!(strip_json_fences(input), "{\"a\":1}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "  {\"key\": \"value\"}\n";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_removes_interior_occurrences() {
        let input = "{\"code\": \"```json x ```\"}";
        assert_eq!(strip_json_fences(input), "{\"code\": \" x \"}");
    }

    #[test]
    fn test_strip_json_fences_keeps_surrounding_prose() {
        let input = "Here you go:\n```json\n{\"a\":1}\n```\nEnjoy!";
        assert_eq!(strip_json_fences(input), "Here you go:\n\n{\"a\":1}\n\nEnjoy!");
    }

    #[test]
    fn test_parse_reply_fenced_object() {
        let reply = parse_reply(Some("```json\n{\"a\":1}\n```"));
        assert_eq!(
            reply,
            ReplyJson::Parsed {
                value: json!({"a": 1}),
                text: "{\"a\":1}".to_string()
            }
        );
    }

    #[test]
    fn test_parse_reply_prose_is_unparsable() {
        let reply = parse_reply(Some("Sure! ```json {\"a\":1} ``` Let me know."));
        assert_eq!(
            reply,
            ReplyJson::Unparsable("Sure!  {\"a\":1}  Let me know.".to_string())
        );
    }

    #[test]
    fn test_parse_reply_whitespace_only_is_unparsable_empty_string() {
        assert_eq!(
            parse_reply(Some("  \n ")),
            ReplyJson::Unparsable(String::new())
        );
    }

    #[test]
    fn test_parse_reply_absent_or_empty() {
        assert_eq!(parse_reply(None), ReplyJson::Empty);
        assert_eq!(parse_reply(Some("")), ReplyJson::Empty);
    }
}
