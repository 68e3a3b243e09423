//! Source text ports
//!
//! The translated verse text and the ground-truth annotations both come from
//! files the pipeline does not own.

use face_quorum_domain::GroundTruthRow;
use thiserror::Error;

/// Errors raised while loading source texts
#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("Cannot read {path}: {message}")]
    Io { path: String, message: String },

    #[error("Malformed {path} (line {line}): {message}")]
    Malformed {
        path: String,
        line: usize,
        message: String,
    },
}

/// Translated text lookup by verse
pub trait VerseCorpus: Send + Sync {
    /// Text of `chapter:verse`, or `None` when the verse is absent.
    fn get_text(&self, chapter: u32, verse: u32) -> Option<String>;
}

/// Ordered ground-truth rows
pub trait GroundTruthSource: Send + Sync {
    fn load(&self) -> Result<Vec<GroundTruthRow>, CorpusError>;
}
