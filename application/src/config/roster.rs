//! Agent roster

use face_quorum_domain::Model;
use serde::{Deserialize, Serialize};

/// One named agent bound to a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSpec {
    pub name: String,
    pub model: Model,
}

impl AgentSpec {
    pub fn new(name: impl Into<String>, model: impl Into<Model>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Every agent the pipeline talks to.
///
/// Review and debate use separate linguist lists so a debate can run on
/// cheaper models than the independent reviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub review_linguists: Vec<AgentSpec>,
    pub critic: AgentSpec,
    pub debate_linguists: Vec<AgentSpec>,
    pub moderator: AgentSpec,
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            review_linguists: vec![
                AgentSpec::new("GEMINI_LINGUIST", Model::Gemini3Pro),
                AgentSpec::new("GPT5_LINGUIST", Model::Gpt5),
            ],
            critic: AgentSpec::new("LINGUISTIC_CRITIC", Model::Gpt5Mini),
            debate_linguists: vec![
                AgentSpec::new("GEMINI_LINGUIST", Model::Gemini20FlashLite),
                AgentSpec::new("GPT5_LINGUIST", Model::Gpt4o),
            ],
            moderator: AgentSpec::new("Moderator", Model::Gpt4o),
        }
    }
}
