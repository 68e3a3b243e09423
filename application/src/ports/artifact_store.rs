//! Artifact store port
//!
//! Persists the review table, the debate table and the final report. The
//! tables are the hand-off points between stages, so each stage can run in
//! its own process.

use face_quorum_domain::{BookReport, DebateResult, DebateRow, ReviewResult, ReviewRow};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised at the persistence boundary
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("Malformed table {path}: {message}")]
    Malformed { path: PathBuf, message: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub trait ArtifactStore: Send + Sync {
    /// Write the independent review table; returns the path written.
    fn write_reviews(&self, results: &[ReviewResult]) -> Result<PathBuf, StoreError>;

    /// Read the independent review table.
    fn read_reviews(&self) -> Result<Vec<ReviewRow>, StoreError>;

    /// Write the debate table; returns the path written.
    fn write_debates(&self, results: &[DebateResult]) -> Result<PathBuf, StoreError>;

    /// Read the debate table.
    fn read_debates(&self) -> Result<Vec<DebateRow>, StoreError>;

    /// Write the coalesced report; returns the path written.
    fn write_report(&self, report: &BookReport) -> Result<PathBuf, StoreError>;
}
