//! Conversation messages

use serde::{Deserialize, Serialize};

/// Source name given to the task message that opens each run.
pub const SEED_SOURCE: &str = "user";

/// Role of a message in a model request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A published conversation turn (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Name of the participant that produced the message, or [`SEED_SOURCE`]
    pub source: String,
    /// Plain text or schema-serialized JSON
    pub content: String,
}

impl Message {
    pub fn new(source: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            content: content.into(),
        }
    }

    /// The task message that opens a run.
    pub fn seed(content: impl Into<String>) -> Self {
        Self::new(SEED_SOURCE, content)
    }

    pub fn is_seed(&self) -> bool {
        self.source == SEED_SOURCE
    }

    /// Role-tagged view of this message as seen by `speaker`.
    ///
    /// The speaker's own turns are assistant messages; everything else,
    /// including other participants' turns, reaches it as a named user message.
    pub fn as_seen_by(&self, speaker: &str) -> ChatMessage {
        if self.source == speaker {
            ChatMessage::assistant(self.content.clone())
        } else {
            ChatMessage::user(self.content.clone()).with_name(&self.source)
        }
    }
}

/// A role-tagged message sent to a model (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            name: None,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            name: None,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            name: None,
            content: content.into(),
        }
    }

    /// Attach a speaker name. Providers only accept `[A-Za-z0-9_-]`, so
    /// anything else is replaced with `_`.
    pub fn with_name(mut self, name: &str) -> Self {
        let sanitized: String = name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        if !sanitized.is_empty() {
            self.name = Some(sanitized);
        }
        self
    }
}
