//! USFM verse corpus
//!
//! Reads one book in USFM and indexes the plain text of every verse by
//! `(chapter, verse)`. Headings, footnotes and cross references are dropped;
//! word-level markup keeps only the surface word.

use face_quorum_application::ports::corpus::{CorpusError, VerseCorpus};
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Paragraph-level markers whose whole line is not verse text.
const HEADING_LINE: &str =
    r"^\\(id|ide|usfm|sts|rem|h|toc\d*|toca\d*|mt\d*|mte\d*|ms\d*|mr|s\d*|sr|r|d|sp|cl|cd)(\s|$)";
const NOTE: &str = r"(?s)\\(f|fe|x)\s.*?\\(f|fe|x)\*";
const WORD: &str = r"\\\+?w\s+([^|\\]*?)(\|[^\\]*)?\\\+?w\*";
const CHAPTER_OR_VERSE: &str = r"\\(c|v)\s+(\d+)(?:[-\u{2013}]\d+)?[a-z]?";
const ANY_MARKER: &str = r"\\\+?[a-z]+\d*\*?";

struct Markers {
    heading_line: Regex,
    note: Regex,
    word: Regex,
    chapter_or_verse: Regex,
    any_marker: Regex,
}

impl Markers {
    fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            heading_line: Regex::new(HEADING_LINE)?,
            note: Regex::new(NOTE)?,
            word: Regex::new(WORD)?,
            chapter_or_verse: Regex::new(CHAPTER_OR_VERSE)?,
            any_marker: Regex::new(ANY_MARKER)?,
        })
    }

    fn clean(&self, raw: &str) -> String {
        let stripped = self.any_marker.replace_all(raw, " ");
        stripped.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

#[derive(Debug, Clone, Default)]
pub struct UsfmCorpus {
    book: Option<String>,
    verses: HashMap<(u32, u32), String>,
}

impl UsfmCorpus {
    /// Load and parse a `.usfm` file.
    pub fn load(path: &Path) -> Result<Self, CorpusError> {
        let content = std::fs::read_to_string(path).map_err(|e| CorpusError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let corpus = Self::parse(&content).map_err(|message| CorpusError::Malformed {
            path: path.display().to_string(),
            line: 0,
            message,
        })?;
        info!(
            path = %path.display(),
            book = corpus.book.as_deref().unwrap_or("?"),
            verses = corpus.len(),
            "Loaded USFM corpus"
        );
        Ok(corpus)
    }

    /// Parse USFM text.
    pub fn parse(content: &str) -> Result<Self, String> {
        let markers = Markers::compile().map_err(|e| e.to_string())?;

        let book = content
            .lines()
            .find_map(|line| line.trim().strip_prefix("\\id "))
            .and_then(|rest| rest.split_whitespace().next())
            .map(str::to_string);

        let body = content
            .lines()
            .filter(|line| !markers.heading_line.is_match(line.trim_start()))
            .collect::<Vec<_>>()
            .join("\n");
        let body = markers.note.replace_all(&body, " ");
        let body = markers.word.replace_all(&body, "$1");

        let mut verses = HashMap::new();
        let mut chapter = 1u32;
        let mut open: Option<(u32, usize)> = None;

        for caps in markers.chapter_or_verse.captures_iter(&body) {
            let Some(whole) = caps.get(0) else { continue };
            if let Some((verse, start)) = open.take() {
                insert_verse(&mut verses, &markers, chapter, verse, &body[start..whole.start()]);
            }

            let number = caps[2]
                .parse::<u32>()
                .map_err(|e| format!("bad number {:?}: {}", &caps[2], e))?;
            match &caps[1] {
                "c" => chapter = number,
                _ => open = Some((number, whole.end())),
            }
        }
        if let Some((verse, start)) = open {
            insert_verse(&mut verses, &markers, chapter, verse, &body[start..]);
        }

        Ok(Self { book, verses })
    }

    /// Book code from the `\id` line, e.g. `PHM`.
    pub fn book(&self) -> Option<&str> {
        self.book.as_deref()
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }
}

fn insert_verse(
    verses: &mut HashMap<(u32, u32), String>,
    markers: &Markers,
    chapter: u32,
    verse: u32,
    raw: &str,
) {
    let text = markers.clean(raw);
    if verses.contains_key(&(chapter, verse)) {
        debug!(chapter, verse, "Duplicate verse marker; keeping the first");
        return;
    }
    verses.insert((chapter, verse), text);
}

impl VerseCorpus for UsfmCorpus {
    fn get_text(&self, chapter: u32, verse: u32) -> Option<String> {
        self.verses
            .get(&(chapter, verse))
            .filter(|text| !text.is_empty())
            .cloned()
    }
}
