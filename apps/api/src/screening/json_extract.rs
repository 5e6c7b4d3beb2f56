//! JSON-in-text location — finds the JSON object inside a free-form model
//! reply.
//!
//! Accepted wrapper grammar, in preference order:
//! 1. a fenced code block (``` or ```json), possibly surrounded by
//!    commentary, whose body contains an object;
//! 2. the span from the first `{` to the last `}` of the whole text
//!    (leading/trailing commentary is tolerated).
//!
//! Anything else — no braces at all — is a locate failure. Location is pure:
//! the same input always yields the same span.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum JsonLocateError {
    #[error("no JSON object found in model reply")]
    NoJsonObject,
}

/// Returns the substring most plausibly holding the reply's JSON object.
pub fn extract_json_object(text: &str) -> Result<&str, JsonLocateError> {
    if let Some(body) = fenced_block(text) {
        if let Some(span) = brace_span(body) {
            return Ok(span);
        }
    }
    brace_span(text).ok_or(JsonLocateError::NoJsonObject)
}

/// Body of the first ``` ... ``` block, with an optional `json` language tag
/// stripped. None when the text has no complete fence pair.
fn fenced_block(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let rest = &text[start + 3..];
    let end = rest.find("```")?;
    let body = rest[..end].trim_start();
    let body = body.strip_prefix("json").unwrap_or(body);
    Some(body.trim())
}

fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end > start {
        Some(&text[start..=end])
    } else {
        None
    }
}
