//! Conversation domain — messages and termination predicates.
//!
//! A conversation is an append-only sequence of [`Message`]s produced by a
//! round-robin panel of participants. The scheduler itself lives in the
//! application layer; this module holds the pure pieces it is built from:
//!
//! - [`Message`] — one published turn (`source`, `content`)
//! - [`ChatMessage`] — the role-tagged view of a message sent to a model
//! - [`Termination`] — composable stop conditions evaluated after each message

mod message;
mod termination;

pub use message::{ChatMessage, Message, Role, SEED_SOURCE};
pub use termination::Termination;
