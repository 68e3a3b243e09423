//! Review result row

use super::parsing::ReviewOutcome;
use crate::core::error::DomainError;
use crate::report::ReviewRow;
use crate::task::{Task, TaskKey};
use serde::{Deserialize, Serialize};

/// Outcome of the independent review for one (linguist, task) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewResult {
    pub model: String,
    pub agent_name: String,
    pub chapter: u32,
    pub verse: u32,
    pub greek_text: String,
    pub translation: String,
    pub face_annotation: String,
    pub notes: String,
    pub score: i64,
    pub reasoning: String,
}

impl ReviewResult {
    pub fn new(
        task: &Task,
        model: impl Into<String>,
        agent_name: impl Into<String>,
        outcome: ReviewOutcome,
    ) -> Self {
        Self {
            model: model.into(),
            agent_name: agent_name.into(),
            chapter: task.chapter(),
            verse: task.verse(),
            greek_text: task.greek_text().to_string(),
            translation: task.translation().to_string(),
            face_annotation: task.face_annotation().to_string(),
            notes: task.notes().to_string(),
            score: outcome.score,
            reasoning: outcome.reasoning,
        }
    }

    /// Rebuild a result from a row of a persisted review table.
    ///
    /// The debate stage can run on a table written by an earlier process; a
    /// row without a usable chapter or verse cannot be grouped.
    pub fn from_row(row: &ReviewRow) -> Result<Self, DomainError> {
        let chapter = row
            .chapter
            .and_then(|c| u32::try_from(c).ok())
            .ok_or_else(|| {
                DomainError::InvalidTask(format!("no chapter for verse {}", row.verse))
            })?;
        let verse = u32::try_from(row.verse)
            .map_err(|_| DomainError::InvalidTask(format!("invalid verse {}", row.verse)))?;
        Ok(Self {
            model: row.model.clone(),
            agent_name: row.agent_name.clone(),
            chapter,
            verse,
            greek_text: row.greek_text.clone(),
            translation: row.translation.clone(),
            face_annotation: row.face_annotation.clone(),
            notes: row.notes.clone(),
            score: row.score,
            reasoning: row.model_analysis.clone(),
        })
    }

    pub fn key(&self) -> TaskKey {
        TaskKey::new(self.chapter, self.verse)
    }
}
