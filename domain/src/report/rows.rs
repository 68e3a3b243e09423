//! Typed rows read back from the persisted tables

use crate::core::error::DomainError;
use crate::core::string::non_blank_or;
use crate::task::UNCATEGORIZED;
use std::collections::HashMap;

/// A table record whose column names are matched case-insensitively.
///
/// The review writer uses `Greek_Text` while older debate tables use
/// `greek_text`; both resolve to the same column here.
#[derive(Debug, Clone, Default)]
pub struct NormalizedRecord {
    fields: HashMap<String, String>,
}

impl NormalizedRecord {
    pub fn new<'a>(
        headers: impl IntoIterator<Item = &'a str>,
        values: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let fields = headers
            .into_iter()
            .zip(values)
            .map(|(h, v)| (normalize_header(h), v.to_string()))
            .collect();
        Self { fields }
    }

    /// Raw value of `column`, if the column exists.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(&normalize_header(column)).map(String::as_str)
    }

    /// Value of `column`, or an empty string.
    pub fn text(&self, column: &str) -> String {
        self.get(column).unwrap_or_default().to_string()
    }

    /// Integer value of `column`; accepts `"3"`, `" 3 "` and `"3.0"`.
    pub fn int(&self, column: &str) -> Option<i64> {
        parse_int(self.get(column)?)
    }
}

fn normalize_header(header: &str) -> String {
    header.trim().trim_start_matches('\u{feff}').to_lowercase()
}

fn parse_int(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    raw.parse::<i64>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
}

/// Join key of a verse segment: a verse number may cover several segments
/// that differ in Greek text or face annotation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SegmentKey {
    pub verse: i64,
    pub greek_text: String,
    pub face_annotation: String,
}

impl SegmentKey {
    pub fn new(verse: i64, greek_text: &str, face_annotation: &str) -> Self {
        Self {
            verse,
            greek_text: greek_text.trim().to_string(),
            face_annotation: non_blank_or(face_annotation, UNCATEGORIZED),
        }
    }
}

/// A row of the independent review table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRow {
    pub model: String,
    pub agent_name: String,
    pub chapter: Option<i64>,
    pub verse: i64,
    pub greek_text: String,
    pub translation: String,
    pub face_annotation: String,
    pub notes: String,
    pub score: i64,
    pub model_analysis: String,
}

impl ReviewRow {
    pub fn from_record(record: &NormalizedRecord) -> Result<Self, DomainError> {
        let verse = record
            .int("verse")
            .ok_or_else(|| DomainError::InvalidTask("review row without a verse".to_string()))?;
        Ok(Self {
            model: non_blank_or(&record.text("model"), "Unknown"),
            agent_name: record.text("agent_name"),
            chapter: record.int("chapter"),
            verse,
            greek_text: record.text("greek_text"),
            translation: record.text("translation"),
            face_annotation: non_blank_or(&record.text("face_annotation"), UNCATEGORIZED),
            notes: record.text("notes"),
            score: record.int("score").unwrap_or(0),
            model_analysis: record.text("model_analysis"),
        })
    }

    pub fn segment_key(&self) -> SegmentKey {
        SegmentKey::new(self.verse, &self.greek_text, &self.face_annotation)
    }
}

/// A row of the debate table. `debate` and `closing_statements` are the raw
/// JSON-array strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebateRow {
    pub chapter: Option<i64>,
    pub verse: i64,
    pub face_annotation: String,
    pub greek_text: String,
    pub translation: String,
    pub notes: String,
    pub debate: String,
    pub closing_statements: String,
}

impl DebateRow {
    pub fn from_record(record: &NormalizedRecord) -> Result<Self, DomainError> {
        let verse = record
            .int("verse")
            .ok_or_else(|| DomainError::InvalidTask("debate row without a verse".to_string()))?;
        Ok(Self {
            chapter: record.int("chapter"),
            verse,
            face_annotation: non_blank_or(&record.text("face_annotation"), UNCATEGORIZED),
            greek_text: record.text("greek_text"),
            translation: record.text("translation"),
            notes: record.text("notes"),
            debate: record.get("debate").unwrap_or("[]").to_string(),
            closing_statements: record.get("closing_statements").unwrap_or("[]").to_string(),
        })
    }

    pub fn segment_key(&self) -> SegmentKey {
        SegmentKey::new(self.verse, &self.greek_text, &self.face_annotation)
    }
}
