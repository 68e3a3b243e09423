//! Structured reply types for the review conversation

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A linguist's scored critique of a translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct LinguistReview {
    #[schemars(description = "The score of the translation (1-10, where 10 is best).")]
    pub score: i64,
    #[schemars(description = "A Markdown formatted explanation for the decision, in English.")]
    pub reasoning: String,
}

/// The critic's verdict on a linguist's critique.
///
/// Exactly two fields: anything else in the reply is a parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CriticReview {
    #[schemars(
        description = "True if the analysis is linguistically sound, False if revision is needed."
    )]
    pub accepted: bool,
    #[schemars(
        description = "A Markdown formatted explanation for the decision, in English. If 'accepted' is False, this must contain the revision instructions."
    )]
    pub reasoning: String,
}
