//! Round-robin scheduler

use super::participant::Participant;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::GatewayError;
use face_quorum_domain::core::string::preview;
use face_quorum_domain::{Message, Termination};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, trace};

/// Turns allowed in a single run when the termination never fires.
pub const DEFAULT_TURN_LIMIT: usize = 64;

#[derive(Error, Debug)]
pub enum ConversationError {
    #[error("Conversation has no participants")]
    NoParticipants,

    #[error("Run exceeded {0} turns without meeting its termination condition")]
    TurnLimit(usize),

    #[error("{participant} failed: {source}")]
    Participant {
        participant: String,
        #[source]
        source: GatewayError,
    },
}

impl ConversationError {
    /// Whether the failure came from a model provider.
    pub fn is_gateway(&self) -> bool {
        matches!(self, ConversationError::Participant { .. })
    }
}

/// Messages appended during one run, seed first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunTranscript {
    pub messages: Vec<Message>,
}

impl RunTranscript {
    /// Content of the last message of the run.
    pub fn last_content(&self) -> Option<&str> {
        self.messages.last().map(|m| m.content.as_str())
    }

    /// Messages produced by participants, the seed excluded.
    pub fn after_seed(&self) -> &[Message] {
        match self.messages.first() {
            Some(first) if first.is_seed() => &self.messages[1..],
            _ => &self.messages,
        }
    }

    /// Raw contents of every message of the run, seed included.
    pub fn contents(&self) -> Vec<String> {
        self.messages.iter().map(|m| m.content.clone()).collect()
    }
}

/// Round-robin group chat.
///
/// Participants speak strictly in order starting at index 0. Both the
/// history and the next-speaker index persist across [`run`](Self::run)
/// calls, so a protocol can drive one conversation through several phases.
pub struct RoundRobinChat {
    label: String,
    participants: Vec<Arc<dyn Participant>>,
    history: Vec<Message>,
    next_speaker: usize,
    turn_limit: usize,
    logger: Arc<dyn ConversationLogger>,
}

impl RoundRobinChat {
    pub fn new(participants: Vec<Arc<dyn Participant>>) -> Self {
        Self {
            label: String::new(),
            participants,
            history: Vec::new(),
            next_speaker: 0,
            turn_limit: DEFAULT_TURN_LIMIT,
            logger: Arc::new(NoConversationLogger),
        }
    }

    /// Label attached to every logged message (e.g. "review 1:9 GPT5_LINGUIST").
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_turn_limit(mut self, limit: usize) -> Self {
        self.turn_limit = limit;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Full history across every run so far.
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Index of the participant that speaks next.
    pub fn next_speaker(&self) -> usize {
        self.next_speaker
    }

    /// Seed the conversation with `task` and let participants speak until
    /// `termination` fires over the messages of this run.
    ///
    /// Provider errors propagate immediately; nothing is retried.
    pub async fn run(
        &mut self,
        task: &str,
        termination: &Termination,
    ) -> Result<RunTranscript, ConversationError> {
        let start = self.history.len();
        self.append(Message::seed(task));

        let mut turns = 0;
        while !termination.is_met(&self.history[start..]) {
            if self.participants.is_empty() {
                return Err(ConversationError::NoParticipants);
            }
            if turns >= self.turn_limit {
                return Err(ConversationError::TurnLimit(self.turn_limit));
            }

            let speaker = Arc::clone(&self.participants[self.next_speaker]);
            self.next_speaker = (self.next_speaker + 1) % self.participants.len();

            let content = speaker.produce(&self.history).await.map_err(|source| {
                ConversationError::Participant {
                    participant: speaker.name().to_string(),
                    source,
                }
            })?;
            self.append(Message::new(speaker.name(), content));
            turns += 1;
        }

        debug!(label = %self.label, turns, "Run finished");
        Ok(RunTranscript {
            messages: self.history[start..].to_vec(),
        })
    }

    fn append(&mut self, message: Message) {
        trace!(
            label = %self.label,
            source = %message.source,
            "{}",
            preview(&message.content, 120)
        );
        self.logger.log(ConversationEvent::new(
            "conversation_message",
            json!({
                "conversation": self.label,
                "index": self.history.len(),
                "source": message.source,
                "content": message.content,
            }),
        ));
        self.history.push(message);
    }
}
