//! Protocol parameters — use case loop control.
//!
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Independent review loop control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewParams {
    /// Maximum critic rounds before the last critique is kept as-is.
    pub max_review_rounds: usize,
    /// Book named in the analysis prompt context line.
    pub book: String,
}

impl Default for ReviewParams {
    fn default() -> Self {
        Self {
            max_review_rounds: 3,
            book: "Philemon".to_string(),
        }
    }
}

impl ReviewParams {
    pub fn with_max_review_rounds(mut self, rounds: usize) -> Self {
        self.max_review_rounds = rounds;
        self
    }

    pub fn with_book(mut self, book: impl Into<String>) -> Self {
        self.book = book.into();
        self
    }
}

/// Debate control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateParams {
    /// Full round-robin cycles before closing statements.
    pub rounds: usize,
    /// Reviews a verse needs before it is debated.
    pub expected_reviews: usize,
}

impl Default for DebateParams {
    fn default() -> Self {
        Self {
            rounds: 2,
            expected_reviews: 2,
        }
    }
}

impl DebateParams {
    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn with_expected_reviews(mut self, expected: usize) -> Self {
        self.expected_reviews = expected;
        self
    }

    /// Message budget of the debate run for `participants` speakers:
    /// every participant speaks `rounds` times, plus the seed.
    pub fn debate_messages(&self, participants: usize) -> usize {
        participants * self.rounds + 1
    }

    /// Message budget of the closing run: the closing seed, then one
    /// statement per participant, the moderator's consensus last.
    pub fn closing_messages(&self, participants: usize) -> usize {
        participants + 1
    }
}

/// Batch control across tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BatchParams {
    /// Delay awaited between tasks.
    pub pacing: Duration,
    /// Maximum ground-truth rows to process.
    pub limit: Option<usize>,
}

impl BatchParams {
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(ReviewParams::default().max_review_rounds, 3);
        let debate = DebateParams::default();
        assert_eq!(debate.rounds, 2);
        assert_eq!(debate.expected_reviews, 2);
        let batch = BatchParams::default();
        assert_eq!(batch.pacing, Duration::ZERO);
        assert!(batch.limit.is_none());
    }

    #[test]
    fn test_debate_budget() {
        assert_eq!(DebateParams::default().debate_messages(3), 7);
        assert_eq!(DebateParams::default().with_rounds(3).debate_messages(3), 10);
        assert_eq!(DebateParams::default().closing_messages(3), 4);
    }

    #[test]
    fn test_builder() {
        let batch = BatchParams::default()
            .with_pacing(Duration::from_secs(2))
            .with_limit(Some(5));
        assert_eq!(batch.pacing, Duration::from_secs(2));
        assert_eq!(batch.limit, Some(5));
    }
}
