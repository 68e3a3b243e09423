//! Roster configuration (`[roster]` section)

use super::ConfigIssue;
use face_quorum_application::{AgentSpec, Roster};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAgentConfig {
    pub name: String,
    /// Model identifier, e.g. `gpt-5` or `gemini-3-pro-preview`
    pub model: String,
}

impl From<&AgentSpec> for FileAgentConfig {
    fn from(spec: &AgentSpec) -> Self {
        Self {
            name: spec.name.clone(),
            model: spec.model.to_string(),
        }
    }
}

impl FileAgentConfig {
    fn parse(&self, field: &str) -> (AgentSpec, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        if self.name.trim().is_empty() {
            issues.push(ConfigIssue::new(format!("{}.name", field), "must not be empty"));
        }
        if self.model.trim().is_empty() {
            issues.push(ConfigIssue::new(format!("{}.model", field), "must not be empty"));
        }
        (AgentSpec::new(self.name.trim(), self.model.as_str()), issues)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRosterConfig {
    pub review_linguists: Vec<FileAgentConfig>,
    pub critic: FileAgentConfig,
    pub debate_linguists: Vec<FileAgentConfig>,
    pub moderator: FileAgentConfig,
}

impl Default for FileRosterConfig {
    fn default() -> Self {
        let roster = Roster::default();
        Self {
            review_linguists: roster.review_linguists.iter().map(Into::into).collect(),
            critic: (&roster.critic).into(),
            debate_linguists: roster.debate_linguists.iter().map(Into::into).collect(),
            moderator: (&roster.moderator).into(),
        }
    }
}

impl FileRosterConfig {
    /// Convert to the application roster, collecting issues along the way.
    pub fn to_roster(&self) -> (Roster, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let mut panel = |agents: &[FileAgentConfig], field: &str| -> Vec<AgentSpec> {
            if agents.is_empty() {
                issues.push(ConfigIssue::new(field, "needs at least one linguist"));
            }
            agents
                .iter()
                .enumerate()
                .map(|(i, agent)| {
                    let (spec, found) = agent.parse(&format!("{}[{}]", field, i));
                    issues.extend(found);
                    spec
                })
                .collect()
        };
        let review_linguists = panel(&self.review_linguists, "roster.review_linguists");
        let debate_linguists = panel(&self.debate_linguists, "roster.debate_linguists");

        let (critic, found) = self.critic.parse("roster.critic");
        issues.extend(found);
        let (moderator, found) = self.moderator.parse("roster.moderator");
        issues.extend(found);

        (
            Roster {
                review_linguists,
                critic,
                debate_linguists,
                moderator,
            },
            issues,
        )
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        self.to_roster().1
    }
}
