//! Structured conversation logging
//!
//! [`JsonlConversationLogger`] implements the
//! [`ConversationLogger`](face_quorum_application::ConversationLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlConversationLogger;
