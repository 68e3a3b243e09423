//! CSV/JSON artifact store
//!
//! The review and debate tables are CSV so they can be inspected and edited
//! between stages; the coalesced report is pretty-printed JSON.

use face_quorum_application::ports::artifact_store::{ArtifactStore, StoreError};
use face_quorum_domain::report::NormalizedRecord;
use face_quorum_domain::{BookReport, DebateResult, DebateRow, DomainError, ReviewResult, ReviewRow};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const REVIEW_COLUMNS: [&str; 10] = [
    "Model",
    "Agent_Name",
    "Chapter",
    "Verse",
    "Greek_Text",
    "Translation",
    "Face_Annotation",
    "Notes",
    "Score",
    "Model_Analysis",
];

pub const DEBATE_COLUMNS: [&str; 7] = [
    "Chapter",
    "Verse",
    "Face_Annotation",
    "Greek_Text",
    "Translation",
    "Debate",
    "Closing_Statements",
];

/// Locations of the three artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub reviews: PathBuf,
    pub debates: PathBuf,
    pub report: PathBuf,
}

impl ArtifactPaths {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            reviews: dir.join("review_results.csv"),
            debates: dir.join("debate_results.csv"),
            report: dir.join("report.json"),
        }
    }
}

pub struct CsvArtifactStore {
    paths: ArtifactPaths,
}

impl CsvArtifactStore {
    pub fn new(paths: ArtifactPaths) -> Self {
        Self { paths }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(ArtifactPaths::in_dir(dir))
    }

    pub fn paths(&self) -> &ArtifactPaths {
        &self.paths
    }
}

fn io_error(path: &Path, e: impl ToString) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

fn ensure_parent(path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }
    Ok(())
}

fn write_table<const N: usize>(
    path: &Path,
    columns: [&str; N],
    rows: impl IntoIterator<Item = [String; N]>,
) -> Result<usize, StoreError> {
    ensure_parent(path)?;
    let mut writer = csv::Writer::from_path(path).map_err(|e| io_error(path, e))?;
    writer.write_record(columns).map_err(|e| io_error(path, e))?;

    let mut count = 0;
    for row in rows {
        writer.write_record(&row).map_err(|e| io_error(path, e))?;
        count += 1;
    }
    writer.flush().map_err(|e| io_error(path, e))?;
    Ok(count)
}

/// Read every record of a table, skipping rows `parse` rejects.
fn read_table<T>(
    path: &Path,
    parse: impl Fn(&NormalizedRecord) -> Result<T, DomainError>,
) -> Result<Vec<T>, StoreError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| io_error(path, e))?;
    let headers = reader
        .headers()
        .map_err(|e| StoreError::Malformed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .clone();

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let line = index + 2;
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!(path = %path.display(), line, "Skipping unreadable row: {}", e);
                continue;
            }
        };
        match parse(&NormalizedRecord::new(headers.iter(), record.iter())) {
            Ok(row) => rows.push(row),
            Err(e) => warn!(path = %path.display(), line, "Skipping row: {}", e),
        }
    }
    Ok(rows)
}

impl ArtifactStore for CsvArtifactStore {
    fn write_reviews(&self, results: &[ReviewResult]) -> Result<PathBuf, StoreError> {
        let path = &self.paths.reviews;
        let count = write_table(
            path,
            REVIEW_COLUMNS,
            results.iter().map(|r| {
                [
                    r.model.clone(),
                    r.agent_name.clone(),
                    r.chapter.to_string(),
                    r.verse.to_string(),
                    r.greek_text.clone(),
                    r.translation.clone(),
                    r.face_annotation.clone(),
                    r.notes.clone(),
                    r.score.to_string(),
                    r.reasoning.clone(),
                ]
            }),
        )?;
        info!(path = %path.display(), rows = count, "Wrote review table");
        Ok(path.clone())
    }

    fn read_reviews(&self) -> Result<Vec<ReviewRow>, StoreError> {
        read_table(&self.paths.reviews, ReviewRow::from_record)
    }

    fn write_debates(&self, results: &[DebateResult]) -> Result<PathBuf, StoreError> {
        let path = &self.paths.debates;
        let count = write_table(
            path,
            DEBATE_COLUMNS,
            results.iter().map(|d| {
                [
                    d.chapter.to_string(),
                    d.verse.to_string(),
                    d.face_annotation.clone(),
                    d.greek_text.clone(),
                    d.translation.clone(),
                    d.debate_json(),
                    d.closing_statements_json(),
                ]
            }),
        )?;
        info!(path = %path.display(), rows = count, "Wrote debate table");
        Ok(path.clone())
    }

    fn read_debates(&self) -> Result<Vec<DebateRow>, StoreError> {
        read_table(&self.paths.debates, DebateRow::from_record)
    }

    fn write_report(&self, report: &BookReport) -> Result<PathBuf, StoreError> {
        let path = &self.paths.report;
        let json = report
            .to_json()
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        ensure_parent(path)?;
        std::fs::write(path, json).map_err(|e| io_error(path, e))?;
        info!(path = %path.display(), verses = report.analysis.len(), "Wrote report");
        Ok(path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use face_quorum_application::CoalesceUseCase;
    use face_quorum_domain::{ReportMeta, ReviewGroup, TaskKey, coalesce};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn review(agent: &str, score: i64) -> ReviewResult {
        ReviewResult {
            model: "gpt-5".to_string(),
            agent_name: agent.to_string(),
            chapter: 1,
            verse: 9,
            greek_text: "διὰ τὴν ἀγάπην μᾶλλον παρακαλῶ".to_string(),
            translation: "yet for love's sake I rather appeal to you".to_string(),
            face_annotation: "Mitigate Negative Face".to_string(),
            notes: "Appeal instead of command, \"softened\"".to_string(),
            score,
            reasoning: "Line one.\nLine two, with a comma.".to_string(),
        }
    }

    #[test]
    fn test_reviews_survive_csv_quoting() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvArtifactStore::in_dir(dir.path());
        let written = vec![review("GPT5_LINGUIST", 7)];

        store.write_reviews(&written).unwrap();
        let rows = store.read_reviews().unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].agent_name, "GPT5_LINGUIST");
        assert_eq!(rows[0].chapter, Some(1));
        assert_eq!(rows[0].notes, written[0].notes);
        assert_eq!(rows[0].model_analysis, written[0].reasoning);
        assert_eq!(ReviewResult::from_row(&rows[0]).unwrap(), written[0]);
    }

    #[test]
    fn test_review_header_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvArtifactStore::in_dir(dir.path());
        store.write_reviews(&[]).unwrap();
        let content = std::fs::read_to_string(&store.paths().reviews).unwrap();
        assert_eq!(content.trim_end(), REVIEW_COLUMNS.join(","));
    }

    #[test]
    fn test_debates_keep_json_columns() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvArtifactStore::in_dir(dir.path());
        let group = ReviewGroup {
            key: TaskKey::new(1, 9),
            reviews: vec![review("GEMINI_LINGUIST", 6), review("GPT5_LINGUIST", 7)],
        };
        let turn = r#"{"agent_name": "GPT5_LINGUIST", "argument": "Too direct", "proposed_score": 5}"#;
        let debate = DebateResult::new(&group, vec![turn.to_string()], vec![]);

        store.write_debates(&[debate]).unwrap();
        let rows = store.read_debates().unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].verse, 9);
        assert_eq!(rows[0].closing_statements, "[]");
        let decoded = face_quorum_domain::report::decode_json_list(&rows[0].debate);
        assert_eq!(decoded[0]["proposed_score"], 5);
    }

    #[test]
    fn test_rows_without_verse_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvArtifactStore::in_dir(dir.path());
        std::fs::write(
            &store.paths().debates,
            "chapter,verse,face_annotation,greek_text,translation,debate,closing_statements\n\
             1,,x,y,z,[],[]\n\
             1,4,x,y,z,[],[]\n",
        )
        .unwrap();

        let rows = store.read_debates().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].verse, 4);
    }

    #[test]
    fn test_missing_table_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvArtifactStore::in_dir(&dir.path().join("absent"));
        assert!(matches!(store.read_reviews(), Err(StoreError::Io { .. })));
    }

    #[test]
    fn test_coalesce_from_disk_is_byte_identical() {
        let first_dir = tempfile::tempdir().unwrap();
        let first = Arc::new(CsvArtifactStore::in_dir(first_dir.path()));
        let group = ReviewGroup {
            key: TaskKey::new(1, 9),
            reviews: vec![review("GEMINI_LINGUIST", 6), review("GPT5_LINGUIST", 4)],
        };
        let closing = vec![
            "Now we transition to closing statements.".to_string(),
            r#"{"agent_name": "GEMINI_LINGUIST", "argument": "Hedged", "proposed_score": 6}"#
                .to_string(),
            r#"{"agent_name": "GPT5_LINGUIST", "argument": "Flattened", "proposed_score": 4}"#
                .to_string(),
        ];
        first.write_reviews(&group.reviews).unwrap();
        first
            .write_debates(&[DebateResult::new(&group, vec![], closing)])
            .unwrap();

        let path = CoalesceUseCase::new(first.clone())
            .execute(&ReportMeta::default())
            .unwrap()
            .path;
        let before = std::fs::read(&path).unwrap();

        // reload the tables, write them to a fresh directory, coalesce again
        let second_dir = tempfile::tempdir().unwrap();
        let second = Arc::new(CsvArtifactStore::in_dir(second_dir.path()));
        let reloaded: Vec<ReviewResult> = first
            .read_reviews()
            .unwrap()
            .iter()
            .map(|row| ReviewResult::from_row(row).unwrap())
            .collect();
        second.write_reviews(&reloaded).unwrap();
        std::fs::copy(&first.paths().debates, &second.paths().debates).unwrap();
        let second_path = CoalesceUseCase::new(second.clone())
            .execute(&ReportMeta::default())
            .unwrap()
            .path;

        CoalesceUseCase::new(first.clone())
            .execute(&ReportMeta::default())
            .unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), before);
        assert_eq!(std::fs::read(&second_path).unwrap(), before);
        assert_eq!(
            std::fs::read(&second.paths().reviews).unwrap(),
            std::fs::read(&first.paths().reviews).unwrap()
        );
    }

    #[test]
    fn test_report_written_into_new_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvArtifactStore::in_dir(&dir.path().join("out").join("phm"));
        let row = ReviewRow::from_record(&NormalizedRecord::new(
            ["Model", "Agent_Name", "Chapter", "Verse", "Score"],
            ["gpt-5", "GPT5_LINGUIST", "1", "9", "7"],
        ))
        .unwrap();
        let report = coalesce(&[row], &[], &ReportMeta::default());

        let path = store.write_report(&report).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value["book"], "Philemon");
        assert_eq!(value["analysis"][0]["analysis"][0]["type"], "individual");
    }
}
