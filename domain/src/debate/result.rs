//! Debate result row

use super::grouping::ReviewGroup;
use serde::{Deserialize, Serialize};

/// Serialized outcome of one verse debate.
///
/// `debate` and `closing_statements` hold raw message contents in order.
/// Contents are usually JSON-encoded turns themselves; they are kept
/// verbatim here and only decoded during reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateResult {
    pub chapter: u32,
    pub verse: u32,
    pub face_annotation: String,
    pub greek_text: String,
    pub translation: String,
    pub debate: Vec<String>,
    pub closing_statements: Vec<String>,
}

impl DebateResult {
    pub fn new(group: &ReviewGroup, debate: Vec<String>, closing_statements: Vec<String>) -> Self {
        let lead = group.lead();
        Self {
            chapter: lead.chapter,
            verse: lead.verse,
            face_annotation: lead.face_annotation.clone(),
            greek_text: lead.greek_text.clone(),
            translation: lead.translation.clone(),
            debate,
            closing_statements,
        }
    }

    /// JSON array string of the debate transcript.
    pub fn debate_json(&self) -> String {
        encode_contents(&self.debate)
    }

    /// JSON array string of the closing statements.
    pub fn closing_statements_json(&self) -> String {
        encode_contents(&self.closing_statements)
    }
}

fn encode_contents(contents: &[String]) -> String {
    serde_json::to_string(contents).unwrap_or_else(|_| "[]".to_string())
}
