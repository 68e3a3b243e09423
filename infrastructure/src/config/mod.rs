//! Configuration loading
//!
//! [`FileConfig`] mirrors the TOML layout; [`ConfigLoader`] merges it from
//! defaults, config files and the environment.

pub mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, FileAgentConfig, FileBatchConfig, FileConfig, FileCorpusConfig, FileDebateConfig,
    FileGroundTruthConfig, FileOutputConfig, FileProviderEndpoint, FileProvidersConfig,
    FileReportConfig, FileReviewConfig, FileRosterConfig,
};
pub use loader::{ConfigError, ConfigLoader, ENV_PREFIX, PROJECT_CONFIG_FILE};
