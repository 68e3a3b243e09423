//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file and
//! convert into the application's parameter types.

mod output;
mod pipeline;
mod providers;
mod roster;
mod sources;

pub use output::FileOutputConfig;
pub use pipeline::{FileBatchConfig, FileDebateConfig, FileReportConfig, FileReviewConfig};
pub use providers::{FileProviderEndpoint, FileProvidersConfig};
pub use roster::{FileAgentConfig, FileRosterConfig};
pub use sources::{FileCorpusConfig, FileGroundTruthConfig};

use face_quorum_application::{BatchParams, DebateParams, ReviewParams};
use face_quorum_domain::ReportMeta;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Translated text to evaluate
    pub corpus: FileCorpusConfig,
    /// Expert face annotations
    pub ground_truth: FileGroundTruthConfig,
    pub review: FileReviewConfig,
    pub debate: FileDebateConfig,
    pub batch: FileBatchConfig,
    pub output: FileOutputConfig,
    pub report: FileReportConfig,
    pub providers: FileProvidersConfig,
    /// Agent names and models of each panel
    pub roster: FileRosterConfig,
}

/// A problem found while validating the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl FileConfig {
    /// Validate the whole configuration, returning every issue found.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.roster.validate());
        issues.extend(self.providers.validate());

        if self.debate.expected_reviews != self.roster.review_linguists.len() {
            issues.push(ConfigIssue::new(
                "debate.expected_reviews",
                format!(
                    "expects {} reviews per verse but the roster has {} review linguists",
                    self.debate.expected_reviews,
                    self.roster.review_linguists.len()
                ),
            ));
        }
        if self.debate.rounds == 0 {
            issues.push(ConfigIssue::new("debate.rounds", "must be at least 1"));
        }
        issues
    }

    pub fn review_params(&self) -> ReviewParams {
        ReviewParams::default()
            .with_max_review_rounds(self.review.max_review_rounds)
            .with_book(self.review.book.clone().unwrap_or_else(|| self.report.book.clone()))
    }

    pub fn debate_params(&self) -> DebateParams {
        DebateParams::default()
            .with_rounds(self.debate.rounds)
            .with_expected_reviews(self.debate.expected_reviews)
    }

    pub fn batch_params(&self) -> BatchParams {
        self.batch.to_params()
    }

    pub fn report_meta(&self) -> ReportMeta {
        ReportMeta {
            book: self.report.book.clone(),
            category: self.report.category.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty(), "{:?}", config.validate());
    }

    #[test]
    fn test_defaults_match_application_defaults() {
        let config = FileConfig::default();
        assert_eq!(config.review_params(), ReviewParams::default());
        assert_eq!(config.debate_params(), DebateParams::default());
        assert_eq!(config.batch_params(), BatchParams::default());
        assert_eq!(config.report_meta(), ReportMeta::default());
        assert_eq!(config.roster.to_roster().0, face_quorum_application::Roster::default());
    }

    #[test]
    fn test_review_book_falls_back_to_report_book() {
        let mut config = FileConfig::default();
        config.report.book = "Colossians".to_string();
        assert_eq!(config.review_params().book, "Colossians");

        config.review.book = Some("Philemon".to_string());
        assert_eq!(config.review_params().book, "Philemon");
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
[corpus]
path = "lang/vi/58-PHM.usfm"

[ground_truth]
path = "data/philemon_face_ground_truth.csv"

[review]
max_review_rounds = 2

[debate]
rounds = 3

[batch]
pacing_ms = 1500
limit = 4

[output]
dir = "runs/vi"

[report]
book = "Philemon"
category = "Pauline Epistles"

[providers]
default = "gemini"

[providers.routing]
"gpt-4o" = "openai"

[[roster.review_linguists]]
name = "GEMINI_LINGUIST"
model = "gemini-3-pro-preview"

[[roster.review_linguists]]
name = "GPT5_LINGUIST"
model = "gpt-5"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.corpus.path.to_string_lossy(), "lang/vi/58-PHM.usfm");
        assert_eq!(config.review_params().max_review_rounds, 2);
        assert_eq!(config.debate_params().debate_messages(3), 10);
        assert_eq!(config.batch_params().limit, Some(4));
        assert_eq!(config.batch_params().pacing.as_millis(), 1500);
        assert_eq!(config.output.dir.to_string_lossy(), "runs/vi");
        assert_eq!(config.providers.default.as_deref(), Some("gemini"));
        assert_eq!(config.roster.review_linguists.len(), 2);
        // untouched sections keep their defaults
        assert_eq!(config.roster.critic.name, "LINGUISTIC_CRITIC");
    }

    #[test]
    fn test_mismatched_expected_reviews_is_reported() {
        let mut config = FileConfig::default();
        config.debate.expected_reviews = 3;
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "debate.expected_reviews");
    }
}
