//! Debate domain.
//!
//! Two linguists and a moderator debate the independent reviews of a verse,
//! then issue closing statements. This module holds:
//!
//! - the structured turn types ([`LinguistTurn`], [`ModeratorTurn`], [`DebateConsensus`])
//! - the protocol state machine ([`DebatePhase`])
//! - grouping of review results into per-verse debate inputs ([`group_reviews`])
//! - the serialized [`DebateResult`] row

mod grouping;
mod phase;
mod result;
mod turns;

pub use grouping::{GroupingReport, ReviewGroup, SkippedGroup, group_reviews};
pub use phase::DebatePhase;
pub use result::DebateResult;
pub use turns::{DebateConsensus, LinguistTurn, ModeratorTurn};
