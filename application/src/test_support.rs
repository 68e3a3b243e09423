//! Scripted test doubles shared by the use case tests.

use crate::ports::artifact_store::{ArtifactStore, StoreError};
use crate::ports::corpus::{CorpusError, GroundTruthSource, VerseCorpus};
use crate::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use async_trait::async_trait;
use face_quorum_domain::{
    BookReport, ChatMessage, DebateResult, DebateRow, GroundTruthRow, Model, ResponseSchema,
    ReviewResult, ReviewRow,
};
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Mock session that returns scripted responses in order
pub struct ScriptedSession {
    model: Model,
    responses: Mutex<VecDeque<String>>,
}

impl ScriptedSession {
    pub fn new(model: Model, responses: Vec<String>) -> Self {
        Self {
            model,
            responses: Mutex::new(responses.into()),
        }
    }
}

#[async_trait]
impl LlmSession for ScriptedSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, _history: &[ChatMessage]) -> Result<String, GatewayError> {
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| "(no more responses)".to_string()))
    }
}

/// A session opened through [`ScriptedGateway`]
#[derive(Debug, Clone)]
pub struct CreatedSession {
    pub model: String,
    pub system_prompt: String,
    pub schema: Option<String>,
}

/// Mock gateway that creates ScriptedSessions based on model matching
#[derive(Default)]
pub struct ScriptedGateway {
    /// Sessions keyed by model name; each key maps to a queue of response sets
    session_queues: Mutex<HashMap<String, VecDeque<Vec<String>>>>,
    failing: Mutex<HashSet<String>>,
    created: Mutex<Vec<CreatedSession>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a session script for a specific model
    pub fn add_session(&self, model: &str, responses: &[&str]) {
        self.session_queues
            .lock()
            .unwrap()
            .entry(model.to_string())
            .or_default()
            .push_back(responses.iter().map(|r| r.to_string()).collect());
    }

    /// Make session creation fail for `model`
    pub fn fail_model(&self, model: &str) {
        self.failing.lock().unwrap().insert(model.to_string());
    }

    pub fn created(&self) -> Vec<CreatedSession> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn create_session(
        &self,
        model: &Model,
        system_prompt: &str,
        schema: Option<ResponseSchema>,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        let name = model.to_string();
        if self.failing.lock().unwrap().contains(&name) {
            return Err(GatewayError::ModelNotAvailable(name));
        }
        self.created.lock().unwrap().push(CreatedSession {
            model: name.clone(),
            system_prompt: system_prompt.to_string(),
            schema: schema.map(|s| s.name().to_string()),
        });
        let responses = self
            .session_queues
            .lock()
            .unwrap()
            .get_mut(&name)
            .and_then(|queue| queue.pop_front())
            .unwrap_or_else(|| vec!["(default response)".to_string()]);
        Ok(Box::new(ScriptedSession::new(model.clone(), responses)))
    }
}

pub struct StaticCorpus {
    verses: HashMap<(u32, u32), String>,
}

impl StaticCorpus {
    pub fn new(verses: &[((u32, u32), &str)]) -> Arc<Self> {
        Arc::new(Self {
            verses: verses.iter().map(|(k, v)| (*k, v.to_string())).collect(),
        })
    }
}

impl VerseCorpus for StaticCorpus {
    fn get_text(&self, chapter: u32, verse: u32) -> Option<String> {
        self.verses.get(&(chapter, verse)).cloned()
    }
}

pub struct StaticGroundTruth {
    rows: Vec<GroundTruthRow>,
}

impl StaticGroundTruth {
    pub fn new(rows: Vec<GroundTruthRow>) -> Arc<Self> {
        Arc::new(Self { rows })
    }
}

impl GroundTruthSource for StaticGroundTruth {
    fn load(&self) -> Result<Vec<GroundTruthRow>, CorpusError> {
        Ok(self.rows.clone())
    }
}

pub fn ground_truth_row(chapter: u32, verse: u32, face: &str) -> GroundTruthRow {
    GroundTruthRow {
        chapter,
        verse,
        greek_text: format!("Greek {}:{}", chapter, verse),
        face: face.to_string(),
        notes: "Expert note".to_string(),
    }
}

/// In-memory artifact store
#[derive(Default)]
pub struct MemoryStore {
    pub reviews: Mutex<Vec<ReviewRow>>,
    pub debates: Mutex<Vec<DebateRow>>,
    pub written_reviews: Mutex<Vec<ReviewResult>>,
    pub written_debates: Mutex<Vec<DebateResult>>,
    pub report: Mutex<Option<BookReport>>,
}

impl ArtifactStore for MemoryStore {
    fn write_reviews(&self, results: &[ReviewResult]) -> Result<PathBuf, StoreError> {
        *self.written_reviews.lock().unwrap() = results.to_vec();
        *self.reviews.lock().unwrap() = results.iter().map(review_row).collect();
        Ok(PathBuf::from("memory://reviews"))
    }

    fn read_reviews(&self) -> Result<Vec<ReviewRow>, StoreError> {
        Ok(self.reviews.lock().unwrap().clone())
    }

    fn write_debates(&self, results: &[DebateResult]) -> Result<PathBuf, StoreError> {
        *self.written_debates.lock().unwrap() = results.to_vec();
        *self.debates.lock().unwrap() = results.iter().map(debate_row).collect();
        Ok(PathBuf::from("memory://debates"))
    }

    fn read_debates(&self) -> Result<Vec<DebateRow>, StoreError> {
        Ok(self.debates.lock().unwrap().clone())
    }

    fn write_report(&self, report: &BookReport) -> Result<PathBuf, StoreError> {
        *self.report.lock().unwrap() = Some(report.clone());
        Ok(PathBuf::from("memory://report"))
    }
}

pub fn review_row(result: &ReviewResult) -> ReviewRow {
    ReviewRow {
        model: result.model.clone(),
        agent_name: result.agent_name.clone(),
        chapter: Some(i64::from(result.chapter)),
        verse: i64::from(result.verse),
        greek_text: result.greek_text.clone(),
        translation: result.translation.clone(),
        face_annotation: result.face_annotation.clone(),
        notes: result.notes.clone(),
        score: result.score,
        model_analysis: result.reasoning.clone(),
    }
}

pub fn debate_row(result: &DebateResult) -> DebateRow {
    DebateRow {
        chapter: Some(i64::from(result.chapter)),
        verse: i64::from(result.verse),
        face_annotation: result.face_annotation.clone(),
        greek_text: result.greek_text.clone(),
        translation: result.translation.clone(),
        notes: String::new(),
        debate: result.debate_json(),
        closing_statements: result.closing_statements_json(),
    }
}
