//! Parsing of review replies.
//!
//! | Function | Input | Failure mode |
//! |----------|-------|--------------|
//! | [`parse_critic_review`] | critic reply | strict: any deviation is a parse failure |
//! | [`parse_linguist_review`] | linguist reply | fenced/prose-wrapped JSON accepted |
//! | [`extract_score`] | any free text | `None` when no score can be found |
//! | [`ReviewOutcome::from_critique`] | final critique | never fails, degrades to free text |

use super::schema::{CriticReview, LinguistReview};
use crate::core::error::DomainError;
use crate::json::{extract_json, extract_json_object};
use serde_json::Value;

/// Parse the critic's reply as exactly `{accepted, reasoning}`.
pub fn parse_critic_review(text: &str) -> Result<CriticReview, DomainError> {
    serde_json::from_str::<CriticReview>(text.trim())
        .map_err(|e| DomainError::ParseFailure(format!("critic review: {}", e)))
}

/// Parse a linguist's reply as `{score, reasoning}`.
pub fn parse_linguist_review(text: &str) -> Result<LinguistReview, DomainError> {
    let value = extract_json(text)
        .ok_or_else(|| DomainError::ParseFailure("linguist review: no JSON found".to_string()))?;
    let review: LinguistReview = serde_json::from_value(value)
        .map_err(|e| DomainError::ParseFailure(format!("linguist review: {}", e)))?;
    if !(1..=10).contains(&review.score) {
        return Err(DomainError::InvalidScore(review.score));
    }
    Ok(review)
}

/// Find a 1-10 score in free text.
///
/// # Supported Formats
///
/// 1. **JSON**: `{"score": 8, ...}` (clamped to 1-10)
/// 2. **Fraction**: `8/10`
/// 3. **Label**: `Score: 7` or `Score: [7]`
///
/// ```
/// use face_quorum_domain::review::extract_score;
///
/// assert_eq!(extract_score(r#"{"score": 8, "reasoning": "Good"}"#), Some(8));
/// assert_eq!(extract_score("I rate this 7/10"), Some(7));
/// assert_eq!(extract_score("Score: [3]"), Some(3));
/// assert_eq!(extract_score("No numbers here"), None);
/// ```
pub fn extract_score(text: &str) -> Option<i64> {
    if let Some(map) = extract_json_object(text)
        && let Some(score) = map.get("score").and_then(Value::as_f64)
    {
        return Some((score.round() as i64).clamp(1, 10));
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    for (i, word) in words.iter().enumerate() {
        if let Some(num) = word
            .trim_matches(|c: char| !(c.is_ascii_digit() || c == '/'))
            .strip_suffix("/10")
            .and_then(|n| n.parse::<i64>().ok())
            && (1..=10).contains(&num)
        {
            return Some(num);
        }

        let is_label = word
            .trim_matches(|c: char| !c.is_alphabetic())
            .eq_ignore_ascii_case("score");
        if is_label
            && let Some(next) = words.get(i + 1)
            && let Ok(num) = next
                .trim_matches(|c: char| !c.is_ascii_digit())
                .parse::<i64>()
            && (1..=10).contains(&num)
        {
            return Some(num);
        }
    }
    None
}

/// Score and reasoning recovered from a final critique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewOutcome {
    pub score: i64,
    pub reasoning: String,
    /// `false` when the critique was not valid structured output
    pub structured: bool,
}

impl ReviewOutcome {
    /// Recover `{score, reasoning}` from the critique, degrading to the raw
    /// text (and a score found in it, or 0) when it is not structured.
    pub fn from_critique(critique: &str) -> Self {
        match parse_linguist_review(critique) {
            Ok(review) => Self {
                score: review.score,
                reasoning: review.reasoning,
                structured: true,
            },
            Err(_) => Self {
                score: extract_score(critique).unwrap_or(0),
                reasoning: critique.trim().to_string(),
                structured: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== parse_critic_review Tests ====================

    #[test]
    fn test_critic_accepts_exact_schema() {
        let review =
            parse_critic_review(" {\"accepted\": true, \"reasoning\": \"Sound.\"} \n").unwrap();
        assert!(review.accepted);
        assert_eq!(review.reasoning, "Sound.");
    }

    #[test]
    fn test_critic_extra_field_is_parse_failure() {
        let err = parse_critic_review(r#"{"accepted": true, "reasoning": "x", "score": 3}"#)
            .unwrap_err();
        assert!(err.is_parse_failure());
    }

    #[test]
    fn test_critic_missing_field_is_parse_failure() {
        assert!(parse_critic_review(r#"{"accepted": false}"#).is_err());
    }

    #[test]
    fn test_critic_prose_is_parse_failure() {
        assert!(parse_critic_review("I accept this analysis.").is_err());
    }

    // ==================== parse_linguist_review Tests ====================

    #[test]
    fn test_linguist_review_fenced() {
        let text = "```json\n{\"score\": 4, \"reasoning\": \"The optative is lost.\"}\n```";
        let review = parse_linguist_review(text).unwrap();
        assert_eq!(review.score, 4);
    }

    #[test]
    fn test_linguist_review_out_of_range() {
        let err = parse_linguist_review(r#"{"score": 12, "reasoning": "x"}"#).unwrap_err();
        assert_eq!(err, DomainError::InvalidScore(12));
    }

    // ==================== extract_score Tests ====================

    #[test]
    fn test_extract_score_json_clamped() {
        assert_eq!(extract_score(r#"{"score": 15, "reasoning": "x"}"#), Some(10));
        assert_eq!(extract_score(r#"{"score": 6.6}"#), Some(7));
    }

    #[test]
    fn test_extract_score_patterns() {
        assert_eq!(extract_score("Overall (6/10)."), Some(6));
        assert_eq!(extract_score("**Score:** 5\n\nThe verb..."), Some(5));
        assert_eq!(extract_score("There are 12 words and 3 clauses"), None);
    }

    // ==================== ReviewOutcome Tests ====================

    #[test]
    fn test_outcome_structured() {
        let outcome = ReviewOutcome::from_critique(r#"{"score": 7, "reasoning": "Good"}"#);
        assert!(outcome.structured);
        assert_eq!(outcome.score, 7);
        assert_eq!(outcome.reasoning, "Good");
    }

    #[test]
    fn test_outcome_degrades_to_text() {
        let outcome = ReviewOutcome::from_critique("Score: 3. The imperative is too direct.");
        assert!(!outcome.structured);
        assert_eq!(outcome.score, 3);
        assert_eq!(outcome.reasoning, "Score: 3. The imperative is too direct.");
    }

    #[test]
    fn test_outcome_without_score_is_zero() {
        let outcome = ReviewOutcome::from_critique("no verdict");
        assert_eq!(outcome.score, 0);
    }
}
