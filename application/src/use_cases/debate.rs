//! Debate
//!
//! Two linguists argue over their independent reviews of a verse while a
//! moderator watches for off-rubric turns. After the budgeted rounds the same
//! conversation moves to closing statements.
//!
//! ```text
//! Seeded ──▶ Debating ──▶ Closing ──▶ Serialized
//! ```

use super::shared::{TaskFailure, pace};
use crate::config::{BatchParams, DebateParams, Roster};
use crate::conversation::{
    ConversationError, ModelParticipant, Moderator, Participant, RoundRobinChat,
};
use crate::ports::artifact_store::{ArtifactStore, StoreError};
use crate::ports::conversation_logger::{ConversationLogger, NoConversationLogger};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier, Stage};
use face_quorum_domain::{
    DebatePhase, DebateResult, DomainError, LinguistTurn, PromptTemplate, ResponseSchema,
    ReviewGroup, ReviewResult, SkippedGroup, Termination, group_reviews,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum DebateError {
    #[error("No debate linguists configured")]
    NoLinguists,

    #[error("Expected {expected} reviews, found {found}")]
    GroupSize { expected: usize, found: usize },

    #[error(transparent)]
    Conversation(#[from] ConversationError),

    #[error(transparent)]
    Phase(#[from] DomainError),
}

/// Everything the debate batch produced or skipped.
#[derive(Debug, Clone, Default)]
pub struct DebateBatchOutput {
    pub results: Vec<DebateResult>,
    /// Verses whose review count did not match.
    pub skipped: Vec<SkippedGroup>,
    pub failures: Vec<TaskFailure>,
}

/// Use case for debating grouped reviews
pub struct RunDebateUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    roster: Roster,
    params: DebateParams,
    logger: Arc<dyn ConversationLogger>,
}

impl<G: LlmGateway + 'static> RunDebateUseCase<G> {
    pub fn new(gateway: Arc<G>, roster: Roster, params: DebateParams) -> Self {
        Self {
            gateway,
            roster,
            params,
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Debate one verse.
    ///
    /// The transcript holds every debate message after the seed. The closing
    /// statements hold every message of the closing run, its seed included,
    /// and end with the moderator's consensus.
    pub async fn run_single_verse_debate(
        &self,
        group: &ReviewGroup,
    ) -> Result<DebateResult, DebateError> {
        if group.reviews.len() != self.params.expected_reviews {
            return Err(DebateError::GroupSize {
                expected: self.params.expected_reviews,
                found: group.reviews.len(),
            });
        }
        if self.roster.debate_linguists.is_empty() {
            return Err(DebateError::NoLinguists);
        }

        let lead = group.lead();
        info!("Initiating debate for {}", group.key);
        let mut phase = DebatePhase::Seeded;

        let mut speakers: Vec<Arc<dyn Participant>> = Vec::new();
        for spec in &self.roster.debate_linguists {
            let linguist = ModelParticipant::create(
                self.gateway.as_ref(),
                spec,
                &PromptTemplate::linguist_system(
                    &spec.name,
                    PromptTemplate::debate_task_description(),
                ),
                Some(ResponseSchema::of::<LinguistTurn>("linguist_review")),
            )
            .await
            .map_err(|source| ConversationError::Participant {
                participant: spec.name.clone(),
                source,
            })?;
            speakers.push(Arc::new(linguist));
        }

        let moderator_spec = &self.roster.moderator;
        let moderator = Arc::new(
            Moderator::create(
                self.gateway.as_ref(),
                moderator_spec,
                &lead.greek_text,
                &lead.translation,
                &lead.face_annotation,
            )
            .await
            .map_err(|source| ConversationError::Participant {
                participant: moderator_spec.name.clone(),
                source,
            })?,
        );
        speakers.push(Arc::clone(&moderator) as Arc<dyn Participant>);

        let participants = speakers.len();
        let mut chat = RoundRobinChat::new(speakers)
            .with_label(format!("debate {}", group.key))
            .with_logger(Arc::clone(&self.logger));

        phase = phase.advance(DebatePhase::Debating)?;
        let debate_run = chat
            .run(
                &PromptTemplate::debate_context(group),
                &Termination::MaxMessages(self.params.debate_messages(participants)),
            )
            .await?;
        let transcript: Vec<String> = debate_run
            .after_seed()
            .iter()
            .map(|m| m.content.clone())
            .collect();

        phase = phase.advance(DebatePhase::Closing)?;
        moderator.enter_closing();
        let closing_run = chat
            .run(
                PromptTemplate::closing_instruction(),
                &Termination::MaxMessages(self.params.closing_messages(participants)),
            )
            .await?;

        phase.advance(DebatePhase::Serialized)?;
        info!(
            "Debate for {} finished with {} turns and {} closing messages",
            group.key,
            transcript.len(),
            closing_run.messages.len()
        );
        Ok(DebateResult::new(group, transcript, closing_run.contents()))
    }

    /// Group `results` by verse and debate every well-formed group.
    ///
    /// Groups with the wrong number of reviews are skipped and reported; a
    /// failed debate is recorded and the batch continues.
    pub async fn process_interleaved_results(
        &self,
        results: &[ReviewResult],
        batch: &BatchParams,
        progress: &dyn ProgressNotifier,
    ) -> DebateBatchOutput {
        let grouping = group_reviews(results, self.params.expected_reviews);
        for skipped in &grouping.skipped {
            warn!(
                "Skipping {}: expected {} analyses, found {}",
                skipped.key, skipped.expected, skipped.found
            );
        }

        progress.on_stage_start(Stage::Debate, grouping.groups.len());
        let mut output = DebateBatchOutput {
            skipped: grouping.skipped,
            ..Default::default()
        };

        for (index, group) in grouping.groups.iter().enumerate() {
            pace(batch.pacing, index).await;
            let label = group.key.to_string();
            match self.run_single_verse_debate(group).await {
                Ok(result) => {
                    progress.on_task_complete(Stage::Debate, &label, true);
                    output.results.push(result);
                }
                Err(e) => {
                    warn!("Debate for {} failed: {}", label, e);
                    progress.on_task_complete(Stage::Debate, &label, false);
                    output
                        .failures
                        .push(TaskFailure::new(group.key, "debate", e));
                }
            }
        }

        progress.on_stage_complete(Stage::Debate);
        output
    }

    /// Debate with default (no-op) progress and no pacing.
    pub async fn execute(&self, results: &[ReviewResult]) -> DebateBatchOutput {
        self.process_interleaved_results(results, &BatchParams::default(), &NoProgress)
            .await
    }
}

/// Rebuild review results from a persisted review table.
///
/// Rows that cannot be keyed are logged and dropped.
pub fn load_review_results(store: &dyn ArtifactStore) -> Result<Vec<ReviewResult>, StoreError> {
    let rows = store.read_reviews()?;
    Ok(rows
        .iter()
        .filter_map(|row| match ReviewResult::from_row(row) {
            Ok(result) => Some(result),
            Err(e) => {
                warn!("Dropping review row: {}", e);
                None
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MemoryStore, ScriptedGateway, debate_row, review_row};
    use face_quorum_domain::TaskKey;
    use face_quorum_domain::report::{AnalysisEntry, ReportMeta, coalesce, decode_json_list};
    use pretty_assertions::assert_eq;

    fn review(agent: &str, model: &str, chapter: u32, verse: u32, score: i64) -> ReviewResult {
        ReviewResult {
            model: model.to_string(),
            agent_name: agent.to_string(),
            chapter,
            verse,
            greek_text: "διὰ τὴν ἀγάπην μᾶλλον παρακαλῶ".to_string(),
            translation: "yet for love's sake I rather appeal to you".to_string(),
            face_annotation: "Mitigate Negative Face".to_string(),
            notes: "Appeal instead of command".to_string(),
            score,
            reasoning: format!("{agent} reasoning"),
        }
    }

    fn turn(agent: &str, score: i64) -> String {
        format!(
            r#"{{"agent_name": "{agent}", "argument": "{agent} argues", "proposed_score": {score}}}"#
        )
    }

    const QUIET: &str = r#"{"intervene": false, "violators": [], "feedback": ""}"#;

    const CONSENSUS: &str = r#"{"chapter": 1, "verse": "9", "final_consensus_score": 4, "consensus_summary": "The appeal survives in part.", "closing_statements": []}"#;

    fn scripted_gateway() -> ScriptedGateway {
        let gateway = ScriptedGateway::new();
        let gemini = [
            turn("GEMINI_LINGUIST", 6),
            turn("GEMINI_LINGUIST", 5),
            turn("GEMINI_LINGUIST", 5),
        ];
        let gpt = [
            turn("GPT5_LINGUIST", 4),
            turn("GPT5_LINGUIST", 4),
            turn("GPT5_LINGUIST", 4),
        ];
        gateway.add_session(
            "gemini-2.0-flash-lite",
            &gemini.iter().map(String::as_str).collect::<Vec<_>>(),
        );
        gateway.add_session("gpt-4o", &gpt.iter().map(String::as_str).collect::<Vec<_>>());
        gateway.add_session("gpt-4o", &[QUIET, QUIET]);
        gateway.add_session("gpt-4o", &[CONSENSUS]);
        gateway
    }

    fn group() -> ReviewGroup {
        ReviewGroup {
            key: TaskKey::new(1, 9),
            reviews: vec![
                review("GEMINI_LINGUIST", "gemini-3-pro-preview", 1, 9, 6),
                review("GPT5_LINGUIST", "gpt-5", 1, 9, 4),
            ],
        }
    }

    #[tokio::test]
    async fn test_single_verse_message_counts() {
        let gateway = Arc::new(scripted_gateway());
        let use_case = RunDebateUseCase::new(
            Arc::clone(&gateway),
            Roster::default(),
            DebateParams::default(),
        );

        let result = use_case.run_single_verse_debate(&group()).await.unwrap();

        assert_eq!(result.debate.len(), 6);
        assert_eq!(result.closing_statements.len(), 4);
        assert!(result.closing_statements[0].starts_with("Now we transition"));
        assert_eq!(result.debate[2], QUIET);
        assert_eq!(result.closing_statements[1], turn("GEMINI_LINGUIST", 5));
        assert_eq!(result.closing_statements[3], CONSENSUS);
        assert_eq!(result.face_annotation, "Mitigate Negative Face");

        let schemas: Vec<Option<String>> =
            gateway.created().into_iter().map(|s| s.schema).collect();
        assert_eq!(
            schemas,
            vec![
                Some("linguist_review".to_string()),
                Some("linguist_review".to_string()),
                Some("moderator_turn".to_string()),
                Some("debate_consensus".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_closing_statements_round_trip_through_decoder() {
        let use_case = RunDebateUseCase::new(
            Arc::new(scripted_gateway()),
            Roster::default(),
            DebateParams::default(),
        );

        let result = use_case.run_single_verse_debate(&group()).await.unwrap();
        let decoded = decode_json_list(&result.closing_statements_json());

        assert_eq!(decoded.len(), 3);
        assert_eq!(decoded[0]["proposed_score"], 5);
        assert_eq!(decoded[1]["proposed_score"], 4);
        assert_eq!(decoded[2]["final_consensus_score"], 4);
    }

    #[tokio::test]
    async fn test_moderator_closes_with_consensus() {
        let use_case = RunDebateUseCase::new(
            Arc::new(scripted_gateway()),
            Roster::default(),
            DebateParams::default(),
        );

        let result = use_case.run_single_verse_debate(&group()).await.unwrap();
        let report = coalesce(&[], &[debate_row(&result)], &ReportMeta::default());
        let AnalysisEntry::Debate {
            score,
            closing_statements,
            ..
        } = &report.analysis[0].analysis[0]
        else {
            panic!("expected a debate entry");
        };

        assert_eq!(*score, 4);
        let last = closing_statements.last().unwrap();
        assert_eq!(last.agent, "Moderator");
        assert_eq!(last.statement, "The appeal survives in part.");
        assert_eq!(last.score, None);
    }

    #[tokio::test]
    async fn test_wrong_group_size_is_rejected() {
        let use_case = RunDebateUseCase::new(
            Arc::new(ScriptedGateway::new()),
            Roster::default(),
            DebateParams::default(),
        );
        let mut group = group();
        group.reviews.pop();

        let err = use_case.run_single_verse_debate(&group).await.unwrap_err();
        assert!(matches!(err, DebateError::GroupSize { expected: 2, found: 1 }));
    }

    #[tokio::test]
    async fn test_batch_skips_mismatched_groups() {
        let use_case = RunDebateUseCase::new(
            Arc::new(scripted_gateway()),
            Roster::default(),
            DebateParams::default(),
        );
        let results = vec![
            review("GPT5_LINGUIST", "gpt-5", 1, 10, 3),
            review("GEMINI_LINGUIST", "gemini-3-pro-preview", 1, 9, 6),
            review("GPT5_LINGUIST", "gpt-5", 1, 9, 4),
        ];

        let output = use_case.execute(&results).await;

        assert_eq!(output.results.len(), 1);
        assert_eq!(output.results[0].verse, 9);
        assert_eq!(output.skipped.len(), 1);
        assert_eq!(output.skipped[0].key, TaskKey::new(1, 10));
        assert_eq!(output.skipped[0].found, 1);
        assert!(output.failures.is_empty());
    }

    #[tokio::test]
    async fn test_batch_records_failed_debate_and_continues() {
        let gateway = ScriptedGateway::new();
        gateway.fail_model("gemini-2.0-flash-lite");
        let use_case =
            RunDebateUseCase::new(Arc::new(gateway), Roster::default(), DebateParams::default());
        let results = vec![
            review("GEMINI_LINGUIST", "gemini-3-pro-preview", 1, 9, 6),
            review("GPT5_LINGUIST", "gpt-5", 1, 9, 4),
            review("GEMINI_LINGUIST", "gemini-3-pro-preview", 1, 11, 7),
            review("GPT5_LINGUIST", "gpt-5", 1, 11, 5),
        ];

        let output = use_case.execute(&results).await;

        assert!(output.results.is_empty());
        assert_eq!(output.failures.len(), 2);
        assert_eq!(output.failures[0].key, TaskKey::new(1, 9));
        assert_eq!(output.failures[1].key, TaskKey::new(1, 11));
    }

    #[test]
    fn test_load_review_results_drops_unkeyed_rows() {
        let store = MemoryStore::default();
        let mut rows = vec![review_row(&review("GPT5_LINGUIST", "gpt-5", 1, 9, 4))];
        let mut orphan = rows[0].clone();
        orphan.chapter = None;
        rows.push(orphan);
        *store.reviews.lock().unwrap() = rows;

        let results = load_review_results(&store).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].key(), TaskKey::new(1, 9));
    }
}
