//! Task entities

use crate::core::error::DomainError;
use crate::core::string::non_blank_or;
use serde::{Deserialize, Serialize};

/// Sentinel annotation used when the ground truth carries no face category.
///
/// Joins between artifacts are total because the annotation is never empty.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// One row of the expert ground truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundTruthRow {
    pub chapter: u32,
    pub verse: u32,
    pub greek_text: String,
    pub face: String,
    pub notes: String,
}

/// Identity of a task: `(chapter, verse)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskKey {
    pub chapter: u32,
    pub verse: u32,
}

impl TaskKey {
    pub fn new(chapter: u32, verse: u32) -> Self {
        Self { chapter, verse }
    }
}

impl std::fmt::Display for TaskKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.chapter, self.verse)
    }
}

/// A verse to evaluate (Value Object, immutable once built).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    chapter: u32,
    verse: u32,
    greek_text: String,
    translation: String,
    face_annotation: String,
    notes: String,
}

impl Task {
    /// Build a task from a ground-truth row and the translated verse text.
    ///
    /// A blank face annotation is replaced with [`UNCATEGORIZED`].
    pub fn from_ground_truth(
        row: &GroundTruthRow,
        translation: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let translation = translation.into();
        if translation.trim().is_empty() {
            return Err(DomainError::InvalidTask(format!(
                "{}:{} has an empty translation",
                row.chapter, row.verse
            )));
        }
        Ok(Self {
            chapter: row.chapter,
            verse: row.verse,
            greek_text: row.greek_text.clone(),
            translation,
            face_annotation: non_blank_or(&row.face, UNCATEGORIZED),
            notes: row.notes.clone(),
        })
    }

    pub fn key(&self) -> TaskKey {
        TaskKey::new(self.chapter, self.verse)
    }

    pub fn chapter(&self) -> u32 {
        self.chapter
    }

    pub fn verse(&self) -> u32 {
        self.verse
    }

    pub fn greek_text(&self) -> &str {
        &self.greek_text
    }

    pub fn translation(&self) -> &str {
        &self.translation
    }

    pub fn face_annotation(&self) -> &str {
        &self.face_annotation
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }
}
