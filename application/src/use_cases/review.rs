//! Independent review
//!
//! A linguist analyses one task; a critic judges the analysis against the
//! rubric; a rejected analysis is revised, at most `max_review_rounds` times.
//!
//! ```text
//! analysis ─▶ critic ─┬─ accepted ──────────▶ keep critique
//!                     ├─ unparsable ────────▶ keep critique (fail-open)
//!                     └─ rejected ─▶ revise ─▶ critic ... (bounded)
//! ```

use super::shared::{TaskFailure, pace};
use crate::config::{AgentSpec, BatchParams, ReviewParams, Roster};
use crate::conversation::{ConversationError, ModelParticipant, Participant, RoundRobinChat};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::corpus::{CorpusError, GroundTruthSource, VerseCorpus};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier, Stage};
use face_quorum_domain::{
    CriticReview, LinguistReview, PromptTemplate, ResponseSchema, ReviewOutcome, ReviewResult,
    Task, TaskKey, Termination, parse_critic_review,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("No linguists configured")]
    NoLinguists,

    #[error("Ground truth unavailable: {0}")]
    GroundTruth(#[from] CorpusError),
}

/// How the critique loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewEnding {
    Accepted,
    /// The critic's reply was not a valid verdict; the critique is kept.
    CriticUnparsable,
    /// Every round was rejected; the last revision is kept.
    RoundsExhausted,
}

/// Final critique and how it was reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewLoopOutcome {
    pub critique: String,
    /// Critic rounds that ended in a rejection.
    pub rejections: usize,
    pub ending: ReviewEnding,
}

/// Run the analysis, critique and revision loop on one task.
///
/// The linguist and critic share one conversation. Each step is a separate
/// run of a single turn, so the speakers alternate linguist, critic,
/// linguist as the runs are issued.
pub async fn perform_analysis_and_review(
    linguist: Arc<dyn Participant>,
    critic: Arc<dyn Participant>,
    analysis_prompt: &str,
    params: &ReviewParams,
    logger: Arc<dyn ConversationLogger>,
) -> Result<ReviewLoopOutcome, ConversationError> {
    let linguist_name = linguist.name().to_string();
    let critic_name = critic.name().to_string();
    let one_turn = Termination::MaxTurns(1);
    let schema_json = ResponseSchema::of::<CriticReview>("critic_review").to_pretty_json();

    let mut chat = RoundRobinChat::new(vec![linguist, critic])
        .with_label(format!("review {}", linguist_name))
        .with_logger(Arc::clone(&logger));

    info!("Starting independent analysis for {}", linguist_name);
    let mut critique = chat
        .run(analysis_prompt, &one_turn)
        .await?
        .last_content()
        .unwrap_or_default()
        .to_string();

    for round in 1..=params.max_review_rounds {
        info!("Review round {} for {}", round, linguist_name);
        let instruction = PromptTemplate::critic_instruction(&critic_name, &schema_json, &critique);
        let verdict_text = chat
            .run(&instruction, &one_turn)
            .await?
            .last_content()
            .unwrap_or_default()
            .to_string();

        let verdict = match parse_critic_review(&verdict_text) {
            Ok(verdict) => verdict,
            Err(e) => {
                warn!("Critic reply unparsable, keeping current analysis: {}", e);
                return Ok(ReviewLoopOutcome {
                    critique,
                    rejections: round - 1,
                    ending: ReviewEnding::CriticUnparsable,
                });
            }
        };

        logger.log(ConversationEvent::new(
            "review_verdict",
            json!({
                "linguist": linguist_name,
                "round": round,
                "accepted": verdict.accepted,
                "reasoning": verdict.reasoning,
            }),
        ));

        if verdict.accepted {
            info!("Analysis accepted: {}", verdict.reasoning);
            return Ok(ReviewLoopOutcome {
                critique,
                rejections: round - 1,
                ending: ReviewEnding::Accepted,
            });
        }

        info!("Analysis rejected: {}", verdict.reasoning);
        let revision = PromptTemplate::revision_prompt(&linguist_name, &verdict.reasoning);
        critique = chat
            .run(&revision, &one_turn)
            .await?
            .last_content()
            .unwrap_or_default()
            .to_string();
    }

    warn!("Max review rounds reached for {}, keeping last version", linguist_name);
    Ok(ReviewLoopOutcome {
        critique,
        rejections: params.max_review_rounds,
        ending: ReviewEnding::RoundsExhausted,
    })
}

/// Input for the RunReview use case
#[derive(Debug, Clone, Default)]
pub struct RunReviewInput {
    pub roster: Roster,
    pub params: ReviewParams,
    pub batch: BatchParams,
}

/// Everything the review batch produced or skipped.
#[derive(Debug, Clone, Default)]
pub struct ReviewBatchOutput {
    pub results: Vec<ReviewResult>,
    /// Ground-truth verses with no usable translation in the corpus.
    pub missing: Vec<TaskKey>,
    pub failures: Vec<TaskFailure>,
}

/// Use case for reviewing every ground-truth verse with every linguist
pub struct RunReviewUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    corpus: Arc<dyn VerseCorpus>,
    ground_truth: Arc<dyn GroundTruthSource>,
    logger: Arc<dyn ConversationLogger>,
}

impl<G: LlmGateway + 'static> RunReviewUseCase<G> {
    pub fn new(
        gateway: Arc<G>,
        corpus: Arc<dyn VerseCorpus>,
        ground_truth: Arc<dyn GroundTruthSource>,
    ) -> Self {
        Self {
            gateway,
            corpus,
            ground_truth,
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: &RunReviewInput) -> Result<ReviewBatchOutput, ReviewError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: &RunReviewInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<ReviewBatchOutput, ReviewError> {
        let linguists = &input.roster.review_linguists;
        if linguists.is_empty() {
            return Err(ReviewError::NoLinguists);
        }

        let mut rows = self.ground_truth.load()?;
        if let Some(limit) = input.batch.limit {
            rows.truncate(limit);
        }

        info!(
            "Reviewing {} verses with {} linguists",
            rows.len(),
            linguists.len()
        );
        progress.on_stage_start(Stage::Review, rows.len() * linguists.len());

        let mut output = ReviewBatchOutput::default();
        for (index, row) in rows.iter().enumerate() {
            let key = TaskKey::new(row.chapter, row.verse);
            let Some(translation) = self.corpus.get_text(row.chapter, row.verse) else {
                warn!("No translation for {}, skipping", key);
                output.missing.push(key);
                continue;
            };
            let task = match Task::from_ground_truth(row, &translation) {
                Ok(task) => task,
                Err(e) => {
                    warn!("Skipping {}: {}", key, e);
                    output.missing.push(key);
                    continue;
                }
            };

            pace(input.batch.pacing, index).await;

            for linguist in linguists {
                let label = format!("{} {}", key, linguist.name);
                match self.review_task(&task, linguist, input).await {
                    Ok(result) => {
                        info!("{} scored {}", label, result.score);
                        progress.on_task_complete(Stage::Review, &label, true);
                        output.results.push(result);
                    }
                    Err(e) => {
                        warn!("{} failed: {}", label, e);
                        progress.on_task_complete(Stage::Review, &label, false);
                        output
                            .failures
                            .push(TaskFailure::new(key, linguist.name.clone(), e));
                    }
                }
            }
        }

        progress.on_stage_complete(Stage::Review);
        Ok(output)
    }

    /// Review one task with one linguist.
    async fn review_task(
        &self,
        task: &Task,
        linguist: &AgentSpec,
        input: &RunReviewInput,
    ) -> Result<ReviewResult, ConversationError> {
        let linguist_participant = ModelParticipant::create(
            self.gateway.as_ref(),
            linguist,
            &PromptTemplate::linguist_system(
                &linguist.name,
                PromptTemplate::review_task_description(),
            ),
            Some(ResponseSchema::of::<LinguistReview>("linguist_review")),
        )
        .await
        .map_err(|source| ConversationError::Participant {
            participant: linguist.name.clone(),
            source,
        })?;

        let critic = &input.roster.critic;
        let critic_participant = ModelParticipant::create(
            self.gateway.as_ref(),
            critic,
            PromptTemplate::critic_system(),
            Some(ResponseSchema::of::<CriticReview>("critic_review")),
        )
        .await
        .map_err(|source| ConversationError::Participant {
            participant: critic.name.clone(),
            source,
        })?;

        let prompt = PromptTemplate::analysis_prompt(&input.params.book, task);
        let outcome = perform_analysis_and_review(
            Arc::new(linguist_participant),
            Arc::new(critic_participant),
            &prompt,
            &input.params,
            Arc::clone(&self.logger),
        )
        .await?;

        let parsed = ReviewOutcome::from_critique(&outcome.critique);
        if !parsed.structured {
            warn!(
                "{} {} returned unstructured critique, extracted score {}",
                task.key(),
                linguist.name,
                parsed.score
            );
        }

        Ok(ReviewResult::new(
            task,
            linguist.model.as_str(),
            linguist.name.clone(),
            parsed,
        ))
    }
}
