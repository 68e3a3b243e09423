//! OpenAI-compatible session
//!
//! The endpoint is stateless; the caller's history is sent in full on every
//! call, behind the session's system prompt.

use super::types::{ChatRequest, ChatResponse, response_format};
use crate::providers::error::ProviderError;
use async_trait::async_trait;
use face_quorum_application::ports::llm_gateway::{GatewayError, LlmSession};
use face_quorum_domain::{ChatMessage, Model, ResponseSchema};
use serde_json::Value;
use tracing::debug;

pub struct OpenAiCompatSession {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: Model,
    system_prompt: String,
    response_format: Option<Value>,
}

impl OpenAiCompatSession {
    pub fn new(
        client: reqwest::Client,
        endpoint: String,
        api_key: String,
        model: Model,
        system_prompt: impl Into<String>,
        schema: Option<&ResponseSchema>,
    ) -> Self {
        Self {
            client,
            endpoint,
            api_key,
            model,
            system_prompt: system_prompt.into(),
            response_format: schema.map(response_format),
        }
    }

    fn messages(&self, history: &[ChatMessage]) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(history.len() + 1);
        if !self.system_prompt.is_empty() {
            messages.push(ChatMessage::system(self.system_prompt.clone()));
        }
        messages.extend_from_slice(history);
        messages
    }

    async fn complete(&self, history: &[ChatMessage]) -> Result<String, ProviderError> {
        let request = ChatRequest {
            model: self.model.as_str(),
            messages: self.messages(history),
            response_format: self.response_format.clone(),
        };

        debug!(
            model = %self.model,
            messages = request.messages.len(),
            structured = request.response_format.is_some(),
            "Sending chat completion"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status { status, body });
        }

        let body: ChatResponse = response.json().await?;
        let message = body
            .choices
            .into_iter()
            .next()
            .ok_or(ProviderError::EmptyResponse)?
            .message;

        Ok(message.content.or(message.refusal).unwrap_or_default())
    }
}

#[async_trait]
impl LlmSession for OpenAiCompatSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, history: &[ChatMessage]) -> Result<String, GatewayError> {
        Ok(self.complete(history).await?)
    }
}
