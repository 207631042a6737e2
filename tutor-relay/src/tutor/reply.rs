//! Parsing the model's JSON reply.
//!
//! Models often wrap JSON in a Markdown code fence, sometimes with prose
//! in front of it. A payload that opens with `{` is parsed as-is; anything
//! else has its fenced block extracted first.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

const FENCE: &str = "```";

/// Reply object the backend is instructed to emit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelReply {
    pub reply: String,
}

#[derive(Debug, Error)]
pub enum ReplyParseError {
    #[error("model payload is empty")]
    Empty,

    #[error("model payload is not a JSON object")]
    NotObject,

    #[error("model payload is not a reply object: {0}")]
    Json(#[from] serde_json::Error),
}

/// Return the contents of the fenced block, or the trimmed payload when it
/// is bare JSON or has no fence.
///
/// A language tag on the opening fence line (`json`, `JSON`, ...) is
/// skipped. The block ends at the last fence, so backticks inside the
/// reply text survive. An unterminated fence runs to the end of the payload.
pub fn strip_fence(payload: &str) -> &str {
    let trimmed = payload.trim();

    if trimmed.starts_with('{') {
        return trimmed;
    }

    let Some(start) = trimmed.find(FENCE) else {
        return trimmed;
    };

    let mut body = &trimmed[start + FENCE.len()..];

    if let Some((first_line, rest)) = body.split_once('\n') {
        let tag = first_line.trim();
        if !tag.is_empty() && tag.chars().all(|c| c.is_ascii_alphanumeric()) {
            body = rest;
        }
    }

    let body = match body.rfind(FENCE) {
        Some(end) => &body[..end],
        None => body,
    };

    body.trim()
}

/// Strip an optional fence, parse JSON and require an object whose only
/// field is a string `reply`.
pub fn parse_model_reply(payload: &str) -> Result<ModelReply, ReplyParseError> {
    let body = strip_fence(payload);
    if body.is_empty() {
        return Err(ReplyParseError::Empty);
    }

    let value: Value = serde_json::from_str(body)?;
    if !value.is_object() {
        return Err(ReplyParseError::NotObject);
    }

    Ok(serde_json::from_value(value)?)
}
