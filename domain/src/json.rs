//! JSON extraction from model replies.
//!
//! Structured-output providers usually return a bare JSON document, but some
//! wrap it in a fenced block or surround it with prose. These helpers locate
//! the JSON payload without ever failing loudly.

use serde_json::{Map, Value};

/// Parse `text` as a JSON value, accepting fenced blocks and prose around a
/// single top-level object.
///
/// Tried in order:
/// 1. the trimmed text as-is
/// 2. the body of a ```` ```json ```` (or bare ```` ``` ````) fence
/// 3. the slice from the first `{` to the last `}`
pub fn extract_json(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Some(value);
    }
    if let Some(body) = fenced_body(trimmed)
        && let Ok(value) = serde_json::from_str::<Value>(body)
    {
        return Some(value);
    }
    if let Some(start) = trimmed.find('{')
        && let Some(end) = trimmed.rfind('}')
        && end > start
    {
        return serde_json::from_str::<Value>(&trimmed[start..=end]).ok();
    }
    None
}

/// Parse `text` as a JSON value only when it is JSON in its entirety, or a
/// single fenced block and nothing else. Prose around the payload is
/// rejected.
pub fn parse_json_strict(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Some(value);
    }
    let inner = trimmed.strip_prefix("```")?.strip_suffix("```")?;
    let body_start = inner.find('\n')? + 1;
    let body = &inner[body_start..];
    if body.contains("```") {
        return None;
    }
    serde_json::from_str::<Value>(body.trim()).ok()
}

/// Like [`extract_json`] but only yields JSON objects.
pub fn extract_json_object(text: &str) -> Option<Map<String, Value>> {
    match extract_json(text)? {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

fn fenced_body(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after_fence = &text[start + 3..];
    // skip the info string ("json", "JSON", ...) up to the end of the line
    let body_start = after_fence.find('\n')? + 1;
    let body = &after_fence[body_start..];
    let end = body.find("```")?;
    Some(body[..end].trim())
}
