//! Infrastructure layer for face-quorum
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod corpus;
pub mod logging;
pub mod providers;
pub mod store;

// Re-export commonly used types
pub use config::{ConfigError, ConfigIssue, ConfigLoader, FileConfig, FileOutputConfig};
pub use corpus::{CsvGroundTruth, UsfmCorpus};
pub use logging::JsonlConversationLogger;
pub use providers::{
    ProviderAdapter, ProviderKind,
    error::ProviderError,
    openai_compat::{OpenAiCompatProvider, ProviderSettings},
    routing::{RoutingConfig, RoutingGateway},
};
pub use store::{ArtifactPaths, CsvArtifactStore};
