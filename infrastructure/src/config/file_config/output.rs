//! Output configuration (`[output]` section)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Directory every artifact is written into (created if absent)
    pub dir: PathBuf,
    /// JSONL transcript of every conversation, relative to `dir`
    pub conversation_log: Option<PathBuf>,
    /// Daily-rolling diagnostic log file prefix, relative to `dir`
    pub log_file: Option<String>,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
            conversation_log: Some(PathBuf::from("conversations.jsonl")),
            log_file: Some("face-quorum.log".to_string()),
        }
    }
}

impl FileOutputConfig {
    /// Resolve `path` against the output directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.dir.join(path)
        }
    }

    pub fn conversation_log_path(&self) -> Option<PathBuf> {
        self.conversation_log.as_deref().map(|p| self.resolve(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_paths_land_in_output_dir() {
        let config = FileOutputConfig::default();
        assert_eq!(
            config.conversation_log_path(),
            Some(PathBuf::from("output/conversations.jsonl"))
        );
    }

    #[test]
    fn test_absolute_paths_are_kept() {
        let config = FileOutputConfig {
            conversation_log: Some(PathBuf::from("/var/log/fq.jsonl")),
            ..Default::default()
        };
        assert_eq!(config.conversation_log_path(), Some(PathBuf::from("/var/log/fq.jsonl")));
    }
}
