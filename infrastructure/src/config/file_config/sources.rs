//! Input locations (`[corpus]`, `[ground_truth]` sections)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCorpusConfig {
    /// USFM file of the translated book
    pub path: PathBuf,
}

impl Default for FileCorpusConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("lang/en/58-PHM.usfm"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGroundTruthConfig {
    /// CSV with `Chapter, Verse, GreekText, Face, Notes`
    pub path: PathBuf,
}

impl Default for FileGroundTruthConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("philemon_face_ground_truth.csv"),
        }
    }
}
