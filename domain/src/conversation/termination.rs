//! Termination conditions for round-robin runs.
//!
//! A condition is evaluated after every message appended during a run,
//! over the messages of that run (the seed task message first). The first
//! condition to fire stops the run, and the triggering message stays in the
//! transcript.
//!
//! | Condition | Fires when |
//! |-----------|------------|
//! | [`Termination::MaxMessages`] | the run holds `n` messages, seed included |
//! | [`Termination::MaxTurns`] | participants have spoken `n` times |
//! | [`Termination::StructuredApproval`] | a designated participant's JSON reply has `field: true` |
//! | [`Termination::TextMention`] | a participant's reply contains the text |
//! | [`Termination::Any`] | any inner condition fires (logical OR) |

use super::message::Message;
use crate::json::extract_json_object;
use serde_json::Value;

/// Stop condition for a conversation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Termination {
    MaxMessages(usize),
    MaxTurns(usize),
    StructuredApproval { source: String, field: String },
    TextMention(String),
    Any(Vec<Termination>),
}

impl Termination {
    /// Approval by `source` through a boolean `field` in its JSON reply.
    pub fn approval(source: impl Into<String>, field: impl Into<String>) -> Self {
        Termination::StructuredApproval {
            source: source.into(),
            field: field.into(),
        }
    }

    /// Combine with another condition; the first to fire wins.
    pub fn or(self, other: Termination) -> Self {
        match self {
            Termination::Any(mut inner) => {
                inner.push(other);
                Termination::Any(inner)
            }
            first => Termination::Any(vec![first, other]),
        }
    }

    /// Evaluate over the messages of the current run.
    pub fn is_met(&self, run: &[Message]) -> bool {
        match self {
            Termination::MaxMessages(n) => run.len() >= *n,
            Termination::MaxTurns(n) => turns(run) >= *n,
            Termination::StructuredApproval { source, field } => run
                .iter()
                .filter(|m| !m.is_seed() && m.source == *source)
                .any(|m| approves(&m.content, field)),
            Termination::TextMention(text) => run
                .iter()
                .filter(|m| !m.is_seed())
                .any(|m| m.content.contains(text.as_str())),
            Termination::Any(inner) => inner.iter().any(|t| t.is_met(run)),
        }
    }
}

fn turns(run: &[Message]) -> usize {
    run.iter().filter(|m| !m.is_seed()).count()
}

fn approves(content: &str, field: &str) -> bool {
    extract_json_object(content)
        .and_then(|map| map.get(field).cloned())
        .is_some_and(|v| v == Value::Bool(true))
}
