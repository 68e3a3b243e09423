//! Debate protocol state machine
//!
//! ```text
//! Seeded ──▶ Debating ──▶ Closing ──▶ Serialized
//! ```
//!
//! Transitions only move forward, one step at a time.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebatePhase {
    /// Initial context built, no turns taken yet
    Seeded,
    /// Linguist / linguist / moderator rounds in progress
    Debating,
    /// Closing statements being solicited
    Closing,
    /// Transcript and closing statements serialized (terminal)
    Serialized,
}

impl DebatePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebatePhase::Seeded => "seeded",
            DebatePhase::Debating => "debating",
            DebatePhase::Closing => "closing",
            DebatePhase::Serialized => "serialized",
        }
    }

    fn successor(&self) -> Option<DebatePhase> {
        match self {
            DebatePhase::Seeded => Some(DebatePhase::Debating),
            DebatePhase::Debating => Some(DebatePhase::Closing),
            DebatePhase::Closing => Some(DebatePhase::Serialized),
            DebatePhase::Serialized => None,
        }
    }

    /// Move to `next`, which must be the immediate successor.
    pub fn advance(self, next: DebatePhase) -> Result<DebatePhase, DomainError> {
        if self.successor() == Some(next) {
            Ok(next)
        } else {
            Err(DomainError::InvalidTransition {
                from: self.as_str(),
                to: next.as_str(),
            })
        }
    }
}

impl std::fmt::Display for DebatePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
