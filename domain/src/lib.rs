//! Domain layer for face-quorum
//!
//! This crate contains the core evaluation logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Review
//!
//! A linguist scores how well a translation preserves the "face" act of the
//! Greek source. A critic accepts or rejects the argument, and a rejected
//! argument is revised a bounded number of times.
//!
//! ## Debate
//!
//! Two linguists argue over their initial scores in round-robin order while a
//! moderator watches for off-rubric turns, then give closing statements.
//!
//! ## Report
//!
//! Review and debate tables are coalesced into one nested report per book.

pub mod conversation;
pub mod core;
pub mod debate;
pub mod json;
pub mod prompt;
pub mod report;
pub mod review;
pub mod schema;
pub mod task;

// Re-export commonly used types
pub use conversation::{ChatMessage, Message, Role, SEED_SOURCE, Termination};
pub use core::{error::DomainError, model::Model};
pub use debate::{
    DebateConsensus, DebatePhase, DebateResult, GroupingReport, LinguistTurn, ModeratorTurn,
    ReviewGroup, SkippedGroup, group_reviews,
};
pub use prompt::PromptTemplate;
pub use report::{
    AnalysisEntry, BookReport, ClosingStatement, DebateRow, ReportMeta, ReviewRow, TranscriptTurn,
    VerseReport, coalesce,
};
pub use review::{
    CriticReview, LinguistReview, ReviewOutcome, ReviewResult, extract_score, parse_critic_review,
    parse_linguist_review,
};
pub use schema::ResponseSchema;
pub use task::{GroundTruthRow, Task, TaskKey, UNCATEGORIZED};
