//! Stage settings (`[review]`, `[debate]`, `[batch]`, `[report]` sections)

use face_quorum_application::BatchParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReviewConfig {
    /// Critic rounds per linguist before the last critique is kept
    pub max_review_rounds: usize,
    /// Book named in analysis prompts (defaults to `report.book`)
    pub book: Option<String>,
}

impl Default for FileReviewConfig {
    fn default() -> Self {
        Self {
            max_review_rounds: 3,
            book: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDebateConfig {
    /// Turns each participant gets in the debate phase
    pub rounds: usize,
    /// Reviews a verse needs before it is debated
    pub expected_reviews: usize,
}

impl Default for FileDebateConfig {
    fn default() -> Self {
        Self {
            rounds: 2,
            expected_reviews: 2,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBatchConfig {
    /// Delay between tasks, in milliseconds
    pub pacing_ms: u64,
    /// Process at most this many tasks
    pub limit: Option<usize>,
}

impl FileBatchConfig {
    pub fn to_params(&self) -> BatchParams {
        BatchParams::default()
            .with_pacing(Duration::from_millis(self.pacing_ms))
            .with_limit(self.limit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReportConfig {
    pub book: String,
    pub category: String,
}

impl Default for FileReportConfig {
    fn default() -> Self {
        Self {
            book: "Philemon".to_string(),
            category: "Pauline Epistles".to_string(),
        }
    }
}
