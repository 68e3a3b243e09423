//! Structured turn types for the debate conversation

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A linguist's turn in the debate, also used for closing statements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LinguistTurn {
    #[schemars(description = "The name of the linguist speaking.")]
    pub agent_name: String,
    #[schemars(
        description = "Your critique. Reference specific peers if agreeing/disagreeing. If this is a closing statement, include all specific details as to justify your score, even if the idea originated from a peer. This field should be a string containing Markdown formatted text."
    )]
    pub argument: String,
    #[schemars(description = "The score (1-10) you currently advocate for.")]
    pub proposed_score: i64,
}

/// The moderator's verdict on the latest round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ModeratorTurn {
    #[schemars(
        description = "Whether the moderator is stepping in to intervene. False if there is no need to intervene."
    )]
    pub intervene: bool,
    #[schemars(
        description = "The names of the participants who require intervention. Empty if there is no need to intervene."
    )]
    pub violators: Vec<String>,
    #[schemars(
        description = "The feedback to give the debate participant if there is an intervention. Empty if there is no need to intervene."
    )]
    pub feedback: String,
}

/// The moderator's closing consensus, emitted once the debate is closing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DebateConsensus {
    #[schemars(description = "The chapter debated.")]
    pub chapter: i64,
    #[schemars(description = "The verse debated.")]
    pub verse: String,
    #[schemars(
        description = "The final agreed-upon score (integer). Choose the lowest score in the event of non-consensus."
    )]
    pub final_consensus_score: i64,
    #[schemars(description = "A detailed explanation of why this score was chosen.")]
    pub consensus_summary: String,
    #[schemars(
        description = "Closing remarks from the participants in markdown, beginning with a section heading of the participant name."
    )]
    pub closing_statements: Vec<String>,
}
