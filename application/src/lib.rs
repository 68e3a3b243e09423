//! Application layer for face-quorum
//!
//! This crate contains the conversation engine, the review and debate
//! protocols, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod conversation;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use config::{AgentSpec, BatchParams, DebateParams, ReviewParams, Roster};
pub use conversation::{
    ConversationError, ModelParticipant, Moderator, Participant, RoundRobinChat, RunTranscript,
};
pub use ports::{
    artifact_store::{ArtifactStore, StoreError},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    corpus::{CorpusError, GroundTruthSource, VerseCorpus},
    llm_gateway::{GatewayError, LlmGateway, LlmSession},
    progress::{NoProgress, ProgressNotifier, Stage},
};
pub use use_cases::TaskFailure;
pub use use_cases::coalesce::{CoalesceOutput, CoalesceUseCase};
pub use use_cases::debate::{DebateBatchOutput, DebateError, RunDebateUseCase, load_review_results};
pub use use_cases::review::{
    ReviewBatchOutput, ReviewEnding, ReviewError, ReviewLoopOutcome, RunReviewInput,
    RunReviewUseCase, perform_analysis_and_review,
};
pub use use_cases::run_pipeline::{
    PipelineError, PipelineOutput, RunPipelineInput, RunPipelineUseCase,
};
