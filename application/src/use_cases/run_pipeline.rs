//! Run Pipeline use case
//!
//! Review, debate and coalesce in one process, persisting each table before
//! the next stage reads it.

use super::coalesce::{CoalesceOutput, CoalesceUseCase};
use super::debate::{DebateBatchOutput, RunDebateUseCase};
use super::review::{ReviewBatchOutput, ReviewError, RunReviewInput, RunReviewUseCase};
use crate::config::DebateParams;
use crate::ports::artifact_store::{ArtifactStore, StoreError};
use crate::ports::conversation_logger::{ConversationLogger, NoConversationLogger};
use crate::ports::corpus::{GroundTruthSource, VerseCorpus};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use face_quorum_domain::ReportMeta;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Review(#[from] ReviewError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Input for the RunPipeline use case
#[derive(Debug, Clone, Default)]
pub struct RunPipelineInput {
    pub review: RunReviewInput,
    pub debate: DebateParams,
    pub report: ReportMeta,
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub review: ReviewBatchOutput,
    pub debate: DebateBatchOutput,
    pub coalesced: CoalesceOutput,
}

pub struct RunPipelineUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    corpus: Arc<dyn VerseCorpus>,
    ground_truth: Arc<dyn GroundTruthSource>,
    store: Arc<dyn ArtifactStore>,
    logger: Arc<dyn ConversationLogger>,
}

impl<G: LlmGateway + 'static> RunPipelineUseCase<G> {
    pub fn new(
        gateway: Arc<G>,
        corpus: Arc<dyn VerseCorpus>,
        ground_truth: Arc<dyn GroundTruthSource>,
        store: Arc<dyn ArtifactStore>,
    ) -> Self {
        Self {
            gateway,
            corpus,
            ground_truth,
            store,
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub async fn execute(&self, input: &RunPipelineInput) -> Result<PipelineOutput, PipelineError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        input: &RunPipelineInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<PipelineOutput, PipelineError> {
        let review = RunReviewUseCase::new(
            Arc::clone(&self.gateway),
            Arc::clone(&self.corpus),
            Arc::clone(&self.ground_truth),
        )
        .with_logger(Arc::clone(&self.logger))
        .execute_with_progress(&input.review, progress)
        .await?;
        let path = self.store.write_reviews(&review.results)?;
        info!("Review table written to {}", path.display());

        let debate = RunDebateUseCase::new(
            Arc::clone(&self.gateway),
            input.review.roster.clone(),
            input.debate,
        )
        .with_logger(Arc::clone(&self.logger))
        .process_interleaved_results(&review.results, &input.review.batch, progress)
        .await;
        let path = self.store.write_debates(&debate.results)?;
        info!("Debate table written to {}", path.display());

        let coalesced = CoalesceUseCase::new(Arc::clone(&self.store))
            .execute_with_progress(&input.report, progress)?;
        info!("Report written to {}", coalesced.path.display());

        Ok(PipelineOutput {
            review,
            debate,
            coalesced,
        })
    }
}
