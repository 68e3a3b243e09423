//! Conversation engine
//!
//! A turn-bounded, round-robin multi-party chat. Protocols own one
//! [`RoundRobinChat`] per conversation and drive it phase by phase with
//! successive [`RoundRobinChat::run`] calls; history and speaker order carry
//! over between runs.

mod engine;
mod participant;

pub use engine::{ConversationError, DEFAULT_TURN_LIMIT, RoundRobinChat, RunTranscript};
pub use participant::{ModelParticipant, Moderator, Participant};
