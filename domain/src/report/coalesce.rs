//! The coalescing step

use super::entities::{AnalysisEntry, BookReport, ClosingStatement, TranscriptTurn, VerseReport};
use super::lenient::decode_json_list;
use super::rows::{DebateRow, ReviewRow, SegmentKey};
use serde_json::{Map, Value};
use std::collections::HashMap;

const MODERATOR: &str = "Moderator";
const UNKNOWN_AGENT: &str = "Unknown";

/// Top-level report metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportMeta {
    pub book: String,
    pub category: String,
}

impl Default for ReportMeta {
    fn default() -> Self {
        Self {
            book: "Philemon".to_string(),
            category: "Pauline Epistles".to_string(),
        }
    }
}

/// Merge review rows and debate rows into one report.
///
/// Review rows are grouped by [`SegmentKey`] in first-appearance order. Each
/// group becomes one [`VerseReport`] carrying the first row's Greek text as
/// written, with an `individual` entry per row,
/// followed by a `debate` entry when a debate row shares the key. Debate rows
/// that match no review group are appended afterwards, in table order, as
/// reports with only the debate entry.
///
/// The output depends only on the input rows, so coalescing the same tables
/// twice yields identical reports.
pub fn coalesce(reviews: &[ReviewRow], debates: &[DebateRow], meta: &ReportMeta) -> BookReport {
    let mut order: Vec<SegmentKey> = Vec::new();
    let mut groups: HashMap<SegmentKey, Vec<&ReviewRow>> = HashMap::new();
    for row in reviews {
        let key = row.segment_key();
        if !groups.contains_key(&key) {
            order.push(key.clone());
        }
        groups.entry(key).or_default().push(row);
    }

    let mut debate_index: HashMap<SegmentKey, &DebateRow> = HashMap::new();
    let mut debate_order: Vec<SegmentKey> = Vec::new();
    for row in debates {
        let key = row.segment_key();
        if !debate_index.contains_key(&key) {
            debate_order.push(key.clone());
            debate_index.insert(key, row);
        }
    }

    let mut analysis = Vec::with_capacity(order.len());
    for key in &order {
        let rows = &groups[key];
        let first = rows[0];
        let mut entries: Vec<AnalysisEntry> = rows
            .iter()
            .map(|row| AnalysisEntry::Individual {
                model: row.model.clone(),
                score: row.score,
                reasoning: row.model_analysis.clone(),
            })
            .collect();
        if let Some(debate) = debate_index.get(key) {
            entries.push(debate_entry(debate));
        }
        analysis.push(VerseReport {
            verse: key.verse,
            greek: first.greek_text.clone(),
            translation: first.translation.clone(),
            annotation: key.face_annotation.clone(),
            notes: first.notes.clone(),
            analysis: entries,
        });
    }

    for key in debate_order.iter().filter(|k| !groups.contains_key(*k)) {
        let debate = debate_index[key];
        analysis.push(VerseReport {
            verse: key.verse,
            greek: debate.greek_text.clone(),
            translation: debate.translation.clone(),
            annotation: key.face_annotation.clone(),
            notes: debate.notes.clone(),
            analysis: vec![debate_entry(debate)],
        });
    }

    let chapter = reviews
        .iter()
        .find_map(|r| r.chapter)
        .or_else(|| debates.iter().find_map(|d| d.chapter))
        .unwrap_or(1);

    BookReport {
        book: meta.book.clone(),
        chapter,
        category: meta.category.clone(),
        analysis,
    }
}

fn debate_entry(row: &DebateRow) -> AnalysisEntry {
    let closing = decode_json_list(&row.closing_statements);
    let transcript = decode_json_list(&row.debate);
    AnalysisEntry::Debate {
        score: consensus_score(&closing),
        debate_transcript: transcript.iter().filter_map(classify_turn).collect(),
        closing_statements: closing.iter().map(closing_statement).collect(),
    }
}

/// Minimum `proposed_score` across closing statements, or 0 when none
/// carries a score.
///
/// Disagreement resolves to the strictest score.
pub fn consensus_score(closing: &[Map<String, Value>]) -> i64 {
    closing
        .iter()
        .filter_map(|s| s.get("proposed_score").and_then(value_as_int))
        .min()
        .unwrap_or(0)
}

/// Classify a decoded turn by shape: `agent_name` marks a linguist turn,
/// `intervene` a moderator turn. Anything else is not a turn.
pub fn classify_turn(turn: &Map<String, Value>) -> Option<TranscriptTurn> {
    if let Some(agent) = turn.get("agent_name") {
        return Some(TranscriptTurn::Linguist {
            agent: value_as_text(agent).unwrap_or_else(|| UNKNOWN_AGENT.to_string()),
            argument: turn.get("argument").and_then(value_as_text),
            proposed_score: turn.get("proposed_score").and_then(value_as_int),
        });
    }
    if let Some(intervene) = turn.get("intervene") {
        let violators = turn
            .get("violators")
            .and_then(Value::as_array)
            .map(|v| v.iter().filter_map(value_as_text).collect())
            .unwrap_or_default();
        return Some(TranscriptTurn::Moderator {
            agent: MODERATOR.to_string(),
            violators,
            intervened: intervene.as_bool().unwrap_or(false),
            feedback: turn
                .get("feedback")
                .and_then(value_as_text)
                .unwrap_or_default(),
        });
    }
    None
}

/// Shape a decoded closing-phase object as a closing statement.
///
/// Linguist statements keep their agent, argument and score. A moderator
/// consensus object contributes its summary without a score, so it never
/// moves the consensus. Any other object becomes an `Unknown` statement.
pub fn closing_statement(statement: &Map<String, Value>) -> ClosingStatement {
    if statement.contains_key("final_consensus_score") && !statement.contains_key("agent_name") {
        return ClosingStatement {
            agent: MODERATOR.to_string(),
            statement: statement
                .get("consensus_summary")
                .and_then(value_as_text)
                .unwrap_or_default(),
            score: None,
        };
    }
    ClosingStatement {
        agent: statement
            .get("agent_name")
            .and_then(value_as_text)
            .unwrap_or_else(|| UNKNOWN_AGENT.to_string()),
        statement: statement
            .get("argument")
            .and_then(value_as_text)
            .unwrap_or_default(),
        score: statement.get("proposed_score").and_then(value_as_int),
    }
}

fn value_as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const THANKS: &str = "Εὐχαριστῶ τῷ θεῷ μου";
    const NEGATIVE: &str = "Mitigate Negative Face";

    fn review(model: &str, verse: i64, greek: &str, face: &str, score: i64) -> ReviewRow {
        ReviewRow {
            model: model.to_string(),
            agent_name: format!("{}_LINGUIST", model.to_uppercase()),
            chapter: Some(1),
            verse,
            greek_text: greek.to_string(),
            translation: "to Philemon our beloved".to_string(),
            face_annotation: face.to_string(),
            notes: "Warm address".to_string(),
            score,
            model_analysis: format!("{} analysis", model),
        }
    }

    fn debate(verse: i64, greek: &str, face: &str, debate: Value, closing: Value) -> DebateRow {
        DebateRow {
            chapter: Some(1),
            verse,
            face_annotation: face.to_string(),
            greek_text: greek.to_string(),
            translation: "to Philemon our beloved".to_string(),
            notes: String::new(),
            debate: debate.to_string(),
            closing_statements: closing.to_string(),
        }
    }

    fn linguist(agent: &str, score: i64) -> String {
        json!({"agent_name": agent, "argument": format!("{agent} argues"), "proposed_score": score})
            .to_string()
    }

    #[test]
    fn test_consensus_is_minimum() {
        let closing = decode_json_list(
            &json!([linguist("A", 7), linguist("B", 5), linguist("C", 6)]).to_string(),
        );
        assert_eq!(consensus_score(&closing), 5);
    }

    #[test]
    fn test_consensus_without_scores_is_zero() {
        let closing =
            decode_json_list(&json!(["Now we transition to closing statements."]).to_string());
        assert_eq!(consensus_score(&closing), 0);
        assert_eq!(consensus_score(&[]), 0);
    }

    #[test]
    fn test_trimmed_key_join() {
        let reviews = vec![
            review("gemini", 3, "ἀγαπητῷ", "Mitigate Negative Face", 6),
            review("gpt", 3, "ἀγαπητῷ", "Mitigate Negative Face", 4),
        ];
        let debates = vec![debate(
            3,
            " ἀγαπητῷ ",
            "Mitigate Negative Face",
            json!([]),
            json!([linguist("GPT5_LINGUIST", 4)]),
        )];
        let report = coalesce(&reviews, &debates, &ReportMeta::default());

        assert_eq!(report.analysis.len(), 1);
        let verse = &report.analysis[0];
        assert_eq!(verse.analysis.len(), 3);
        assert_eq!(verse.individual_scores(), vec![("gemini", 6), ("gpt", 4)]);
        assert_eq!(verse.debate_score(), Some(4));
    }

    #[test]
    fn test_greek_emitted_as_written() {
        let reviews = vec![review("gemini", 3, " ἀγαπητῷ\n", "Mitigate Negative Face", 6)];
        let debates = vec![debate(
            8,
            "  διὸ  ",
            "Mitigate Negative Face",
            json!([]),
            json!([]),
        )];
        let report = coalesce(&reviews, &debates, &ReportMeta::default());
        assert_eq!(report.analysis[0].greek, " ἀγαπητῷ\n");
        assert_eq!(report.analysis[1].greek, "  διὸ  ");
    }

    #[test]
    fn test_prose_closing_element_does_not_lower_consensus() {
        let closing = json!([
            "I stand by my view. Earlier I wrote {\"agent_name\": \"A\", \"argument\": \"x\", \"proposed_score\": 2} but see below.",
            linguist("B", 6),
        ]);
        let debates = vec![debate(
            9,
            "παρακαλῶ",
            "Mitigate Negative Face",
            json!([]),
            closing,
        )];
        let report = coalesce(&[], &debates, &ReportMeta::default());
        assert_eq!(report.analysis[0].debate_score(), Some(6));
    }

    #[test]
    fn test_segments_sharing_a_verse_stay_apart() {
        let reviews = vec![
            review("gemini", 4, THANKS, "Enhance Positive Face", 8),
            review("gemini", 4, "μνείαν σου ποιούμενος", NEGATIVE, 6),
            review("gpt", 4, THANKS, "Enhance Positive Face", 7),
        ];
        let report = coalesce(&reviews, &[], &ReportMeta::default());
        assert_eq!(report.analysis.len(), 2);
        assert_eq!(report.analysis[0].individual_scores(), vec![("gemini", 8), ("gpt", 7)]);
        assert_eq!(report.analysis[1].annotation, "Mitigate Negative Face");
        assert_eq!(report.analysis[1].debate_score(), None);
    }

    #[test]
    fn test_transcript_classification() {
        let transcript = json!([
            linguist("GEMINI_LINGUIST", 6),
            json!({
                "intervene": true,
                "violators": ["GPT5_LINGUIST"],
                "feedback": "Quote the Greek."
            })
            .to_string(),
            json!({"note": "stray"}).to_string(),
        ]);
        let reviews = vec![review("gemini", 1, "Παῦλος δέσμιος", "Positive Face", 7)];
        let debates = vec![debate(
            1,
            "Παῦλος δέσμιος",
            "Positive Face",
            transcript,
            json!([]),
        )];
        let report = coalesce(&reviews, &debates, &ReportMeta::default());

        let AnalysisEntry::Debate { score, debate_transcript, closing_statements } =
            &report.analysis[0].analysis[1]
        else {
            panic!("expected a debate entry");
        };
        assert_eq!(*score, 0);
        assert!(closing_statements.is_empty());
        assert_eq!(
            debate_transcript,
            &vec![
                TranscriptTurn::Linguist {
                    agent: "GEMINI_LINGUIST".to_string(),
                    argument: Some("GEMINI_LINGUIST argues".to_string()),
                    proposed_score: Some(6),
                },
                TranscriptTurn::Moderator {
                    agent: "Moderator".to_string(),
                    violators: vec!["GPT5_LINGUIST".to_string()],
                    intervened: true,
                    feedback: "Quote the Greek.".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_placeholder_never_in_transcript() {
        let closing = json!([
            "\n Now we transition to closing statements. \n",
            linguist("GEMINI_LINGUIST", 6),
            linguist("GPT5_LINGUIST", 5),
        ]);
        let debates = vec![debate(6, "ὅπως", NEGATIVE, closing.clone(), closing)];
        let report = coalesce(&[], &debates, &ReportMeta::default());
        let AnalysisEntry::Debate { score, debate_transcript, closing_statements } =
            &report.analysis[0].analysis[0]
        else {
            panic!("expected a debate entry");
        };
        assert_eq!(*score, 5);
        assert_eq!(debate_transcript.len(), 2);
        assert_eq!(closing_statements.len(), 2);
        assert!(closing_statements.iter().all(|s| !s.statement.contains("Now we transition")));
    }

    #[test]
    fn test_debate_only_segment() {
        let reviews = vec![review(
            "gemini",
            2,
            "Ἀπφίᾳ τῇ ἀδελφῇ",
            "Positive Face",
            9,
        )];
        let debates = vec![debate(
            7,
            "χαρὰν γὰρ πολλὴν ἔσχον",
            "Enhance Positive Face",
            json!([]),
            json!([linguist("A", 8)]),
        )];
        let report = coalesce(&reviews, &debates, &ReportMeta::default());
        assert_eq!(report.analysis.len(), 2);
        let orphan = &report.analysis[1];
        assert_eq!(orphan.verse, 7);
        assert_eq!(orphan.translation, "to Philemon our beloved");
        assert_eq!(orphan.notes, "");
        assert_eq!(orphan.analysis.len(), 1);
        assert_eq!(orphan.debate_score(), Some(8));
    }

    #[test]
    fn test_moderator_consensus_in_closing() {
        let consensus = json!({
            "chapter": 1, "verse": "9", "final_consensus_score": 6,
            "consensus_summary": "Both agree the appeal survives.", "closing_statements": []
        });
        let statement = closing_statement(consensus.as_object().unwrap());
        assert_eq!(statement.agent, "Moderator");
        assert_eq!(statement.score, None);
        assert_eq!(statement.statement, "Both agree the appeal survives.");
    }

    #[test]
    fn test_intervention_in_closing_kept_as_unknown() {
        let intervention =
            json!({"intervene": true, "violators": ["A"], "feedback": "Cite the text."});
        let statement = closing_statement(intervention.as_object().unwrap());
        assert_eq!(
            statement,
            ClosingStatement {
                agent: "Unknown".to_string(),
                statement: String::new(),
                score: None,
            }
        );
    }

    #[test]
    fn test_idempotent_json() {
        let reviews = vec![
            review("gemini", 3, "ἀγαπητῷ", "Mitigate Negative Face", 6),
            review("gpt", 5, "ἀκούων σου τὴν ἀγάπην", "Positive Face", 7),
        ];
        let debates = vec![debate(
            3,
            "ἀγαπητῷ",
            NEGATIVE,
            json!([]),
            json!([linguist("A", 5)]),
        )];
        let first = coalesce(&reviews, &debates, &ReportMeta::default()).to_json().unwrap();
        let second = coalesce(&reviews, &debates, &ReportMeta::default()).to_json().unwrap();
        assert_eq!(first, second);
        assert!(first.contains("\"type\": \"individual\""));
        assert!(first.contains("ἀγαπητῷ"));
    }

    #[test]
    fn test_chapter_defaults_to_one() {
        let report = coalesce(&[], &[], &ReportMeta::default());
        assert_eq!(report.chapter, 1);
        assert_eq!(report.book, "Philemon");
        assert!(report.analysis.is_empty());
    }
}
