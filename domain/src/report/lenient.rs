//! Tolerant decoding of JSON-array columns.
//!
//! Debate columns arrive in several shapes depending on which writer
//! produced them:
//!
//! 1. a JSON array of objects
//! 2. a JSON array of JSON-encoded strings (double encoding)
//! 3. arrays mixing the above with instructional placeholders, such as the
//!    closing-phase prompt that opens the closing run
//!
//! [`decode_json_list`] flattens all of them to the list of objects they
//! carry. It never fails: anything it cannot decode is dropped. A string
//! element must be a JSON object on its own (or one fenced block); prose that
//! merely contains an object is dropped.

use crate::json::parse_json_strict;
use serde_json::{Map, Value};

/// Substrings that identify prompt text rather than participant output.
pub const PLACEHOLDER_MARKERS: &[&str] = &["Now we transition"];

/// Decode a JSON-array column into the objects it carries.
///
/// A bare JSON object is treated as a one-element list.
pub fn decode_json_list(raw: &str) -> Vec<Map<String, Value>> {
    let Ok(outer) = serde_json::from_str::<Value>(raw.trim()) else {
        return Vec::new();
    };

    match outer {
        Value::Array(items) => items.into_iter().filter_map(decode_element).collect(),
        Value::Object(map) => vec![map],
        _ => Vec::new(),
    }
}

fn decode_element(item: Value) -> Option<Map<String, Value>> {
    match item {
        Value::Object(map) => Some(map),
        Value::String(text) => {
            if is_placeholder(&text) {
                return None;
            }
            match parse_json_strict(&text)? {
                Value::Object(map) => Some(map),
                _ => None,
            }
        }
        _ => None,
    }
}

fn is_placeholder(text: &str) -> bool {
    text.trim().is_empty() || PLACEHOLDER_MARKERS.iter().any(|m| text.contains(m))
}
