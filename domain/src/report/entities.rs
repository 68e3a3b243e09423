//! Report entities — the final, immutable output of reconciliation.

use serde::{Deserialize, Serialize};

/// The complete report for one book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookReport {
    pub book: String,
    pub chapter: i64,
    pub category: String,
    pub analysis: Vec<VerseReport>,
}

impl BookReport {
    /// Pretty JSON (two-space indent, non-ASCII kept as-is).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// All analyses of one verse segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseReport {
    pub verse: i64,
    pub greek: String,
    pub translation: String,
    pub annotation: String,
    pub notes: String,
    pub analysis: Vec<AnalysisEntry>,
}

impl VerseReport {
    /// Consensus score of the debate entry, if a debate was held.
    pub fn debate_score(&self) -> Option<i64> {
        self.analysis.iter().find_map(|entry| match entry {
            AnalysisEntry::Debate { score, .. } => Some(*score),
            AnalysisEntry::Individual { .. } => None,
        })
    }

    /// Scores of the individual reviews, in table order.
    pub fn individual_scores(&self) -> Vec<(&str, i64)> {
        self.analysis
            .iter()
            .filter_map(|entry| match entry {
                AnalysisEntry::Individual { model, score, .. } => Some((model.as_str(), *score)),
                AnalysisEntry::Debate { .. } => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AnalysisEntry {
    Individual {
        model: String,
        score: i64,
        reasoning: String,
    },
    Debate {
        score: i64,
        debate_transcript: Vec<TranscriptTurn>,
        closing_statements: Vec<ClosingStatement>,
    },
}

/// One classified turn of the debate transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum TranscriptTurn {
    Linguist {
        agent: String,
        argument: Option<String>,
        proposed_score: Option<i64>,
    },
    Moderator {
        agent: String,
        violators: Vec<String>,
        intervened: bool,
        feedback: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosingStatement {
    pub agent: String,
    pub statement: String,
    pub score: Option<i64>,
}
