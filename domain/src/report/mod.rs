//! Report reconciliation (coalescing).
//!
//! Merges the independent review table and the debate table into one
//! nested report keyed by verse segment.
//!
//! # Pipeline
//!
//! ```text
//! review rows ──┐                          ┌─▶ individual entries
//!               ├─ SegmentKey join ─▶ VerseReport
//! debate rows ──┘   (verse, greek, face)   └─▶ debate entry (decoded leniently)
//! ```
//!
//! The two tables were written with different header casing; both are read
//! through [`NormalizedRecord`], which looks columns up case-insensitively,
//! so the rest of the pipeline only sees typed rows.

mod coalesce;
mod entities;
mod lenient;
mod rows;

pub use coalesce::{ReportMeta, classify_turn, closing_statement, coalesce, consensus_score};
pub use entities::{AnalysisEntry, BookReport, ClosingStatement, TranscriptTurn, VerseReport};
pub use lenient::{PLACEHOLDER_MARKERS, decode_json_list};
pub use rows::{DebateRow, NormalizedRecord, ReviewRow, SegmentKey};
