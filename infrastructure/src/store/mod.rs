//! Artifact persistence

mod csv_store;

pub use csv_store::{ArtifactPaths, CsvArtifactStore, DEBATE_COLUMNS, REVIEW_COLUMNS};
