//! Ground-truth CSV loader
//!
//! Expected columns (case-insensitive): `Chapter`, `Verse`, `GreekText`,
//! `Face`, `Notes`. `Face` and `Notes` may be blank.

use face_quorum_application::ports::corpus::{CorpusError, GroundTruthSource};
use face_quorum_domain::GroundTruthRow;
use face_quorum_domain::report::NormalizedRecord;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct CsvGroundTruth {
    path: PathBuf,
}

impl CsvGroundTruth {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn malformed(&self, line: usize, message: impl Into<String>) -> CorpusError {
        CorpusError::Malformed {
            path: self.path.display().to_string(),
            line,
            message: message.into(),
        }
    }
}

impl GroundTruthSource for CsvGroundTruth {
    fn load(&self) -> Result<Vec<GroundTruthRow>, CorpusError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| CorpusError::Io {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })?;

        let headers = reader
            .headers()
            .map_err(|e| self.malformed(1, e.to_string()))?
            .clone();

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            // header is line 1
            let line = index + 2;
            let record = record.map_err(|e| self.malformed(line, e.to_string()))?;
            let record = NormalizedRecord::new(headers.iter(), record.iter());

            let chapter = non_negative(record.int("chapter"))
                .ok_or_else(|| self.malformed(line, "missing or invalid Chapter"))?;
            let verse = non_negative(record.int("verse"))
                .ok_or_else(|| self.malformed(line, "missing or invalid Verse"))?;

            rows.push(GroundTruthRow {
                chapter,
                verse,
                greek_text: record.text("greektext").trim().to_string(),
                face: record.text("face").trim().to_string(),
                notes: blank_if_missing(&record.text("notes")),
            });
        }

        info!(path = %self.path.display(), rows = rows.len(), "Loaded ground truth");
        Ok(rows)
    }
}

fn non_negative(value: Option<i64>) -> Option<u32> {
    value.and_then(|v| u32::try_from(v).ok())
}

/// Spreadsheet exports write empty cells as `NaN`.
fn blank_if_missing(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("nan") {
        String::new()
    } else {
        trimmed.to_string()
    }
}
