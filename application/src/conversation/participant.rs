//! Conversation participants

use crate::config::AgentSpec;
use crate::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use async_trait::async_trait;
use face_quorum_domain::{
    ChatMessage, DebateConsensus, Message, ModeratorTurn, PromptTemplate, ResponseSchema,
};
use std::sync::atomic::{AtomicBool, Ordering};

/// A named speaker in a round-robin conversation.
#[async_trait]
pub trait Participant: Send + Sync {
    fn name(&self) -> &str;

    /// Produce the next message given the full history.
    async fn produce(&self, history: &[Message]) -> Result<String, GatewayError>;
}

/// History as seen by `speaker`: its own turns are assistant turns, everyone
/// else speaks as a named user.
fn render_history(speaker: &str, history: &[Message]) -> Vec<ChatMessage> {
    history.iter().map(|m| m.as_seen_by(speaker)).collect()
}

/// Participant backed by one model session.
pub struct ModelParticipant {
    name: String,
    session: Box<dyn LlmSession>,
}

impl ModelParticipant {
    pub fn new(name: impl Into<String>, session: Box<dyn LlmSession>) -> Self {
        Self {
            name: name.into(),
            session,
        }
    }

    /// Open a session for `spec` and wrap it.
    pub async fn create<G: LlmGateway + ?Sized>(
        gateway: &G,
        spec: &AgentSpec,
        system_prompt: &str,
        schema: Option<ResponseSchema>,
    ) -> Result<Self, GatewayError> {
        let session = gateway
            .create_session(&spec.model, system_prompt, schema)
            .await?;
        Ok(Self::new(spec.name.clone(), session))
    }
}

#[async_trait]
impl Participant for ModelParticipant {
    fn name(&self) -> &str {
        &self.name
    }

    async fn produce(&self, history: &[Message]) -> Result<String, GatewayError> {
        self.session
            .send(&render_history(&self.name, history))
            .await
    }
}

/// Debate moderator.
///
/// Replies with a [`ModeratorTurn`] while the debate runs. After
/// [`Moderator::enter_closing`] it replies through a second session that
/// asks for a [`DebateConsensus`] instead.
pub struct Moderator {
    name: String,
    moderation: Box<dyn LlmSession>,
    closing: Box<dyn LlmSession>,
    closing_mode: AtomicBool,
}

impl Moderator {
    pub fn new(
        name: impl Into<String>,
        moderation: Box<dyn LlmSession>,
        closing: Box<dyn LlmSession>,
    ) -> Self {
        Self {
            name: name.into(),
            moderation,
            closing,
            closing_mode: AtomicBool::new(false),
        }
    }

    /// Open both moderator sessions for a verse.
    pub async fn create<G: LlmGateway + ?Sized>(
        gateway: &G,
        spec: &AgentSpec,
        greek_text: &str,
        translation: &str,
        face: &str,
    ) -> Result<Self, GatewayError> {
        let moderation = gateway
            .create_session(
                &spec.model,
                &PromptTemplate::moderator_system(greek_text, translation, face),
                Some(ResponseSchema::of::<ModeratorTurn>("moderator_turn")),
            )
            .await?;
        let closing = gateway
            .create_session(
                &spec.model,
                &PromptTemplate::moderator_closing_system(greek_text, translation, face),
                Some(ResponseSchema::of::<DebateConsensus>("debate_consensus")),
            )
            .await?;
        Ok(Self::new(spec.name.clone(), moderation, closing))
    }

    /// Switch to the consensus schema for the closing phase.
    pub fn enter_closing(&self) {
        self.closing_mode.store(true, Ordering::SeqCst);
    }

    pub fn is_closing(&self) -> bool {
        self.closing_mode.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Participant for Moderator {
    fn name(&self) -> &str {
        &self.name
    }

    async fn produce(&self, history: &[Message]) -> Result<String, GatewayError> {
        let session = if self.is_closing() {
            &self.closing
        } else {
            &self.moderation
        };
        session.send(&render_history(&self.name, history)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use face_quorum_domain::{Model, Role};
    use std::sync::{Arc, Mutex};

    /// Session that records what it was sent and echoes a fixed reply
    struct RecordingSession {
        model: Model,
        reply: String,
        sent: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
    }

    #[async_trait]
    impl LlmSession for RecordingSession {
        fn model(&self) -> &Model {
            &self.model
        }

        async fn send(&self, history: &[ChatMessage]) -> Result<String, GatewayError> {
            self.sent.lock().unwrap().push(history.to_vec());
            Ok(self.reply.clone())
        }
    }

    fn session(reply: &str, sent: &Arc<Mutex<Vec<Vec<ChatMessage>>>>) -> Box<dyn LlmSession> {
        Box::new(RecordingSession {
            model: Model::Gpt4o,
            reply: reply.to_string(),
            sent: Arc::clone(sent),
        })
    }

    #[tokio::test]
    async fn test_model_participant_sees_own_turns_as_assistant() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let participant = ModelParticipant::new("GPT5_LINGUIST", session("ok", &sent));
        let history = vec![
            Message::seed("Evaluate"),
            Message::new("GPT5_LINGUIST", "Score: 6"),
            Message::new("LINGUISTIC_CRITIC", "{\"accepted\": false}"),
        ];

        let reply = participant.produce(&history).await.unwrap();

        assert_eq!(reply, "ok");
        let sent = sent.lock().unwrap();
        let roles: Vec<Role> = sent[0].iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User]);
        assert_eq!(sent[0][2].name.as_deref(), Some("LINGUISTIC_CRITIC"));
    }

    #[tokio::test]
    async fn test_moderator_switches_session_on_closing() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let moderator = Moderator::new(
            "Moderator",
            session("{\"intervene\": false}", &sent),
            session("{\"final_consensus_score\": 5}", &sent),
        );
        let history = vec![Message::seed("Debate")];

        assert!(!moderator.is_closing());
        let during = moderator.produce(&history).await.unwrap();
        moderator.enter_closing();
        let after = moderator.produce(&history).await.unwrap();

        assert!(during.contains("intervene"));
        assert!(after.contains("final_consensus_score"));
        assert!(moderator.is_closing());
    }
}
