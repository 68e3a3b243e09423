//! OpenAI-compatible provider adapter
//!
//! Implements `ProviderAdapter` to plug into the `RoutingGateway`.

use super::session::OpenAiCompatSession;
use crate::providers::error::ProviderError;
use crate::providers::{ProviderAdapter, ProviderKind};
use async_trait::async_trait;
use face_quorum_application::ports::llm_gateway::{GatewayError, LlmSession};
use face_quorum_domain::{Model, ResponseSchema};
use std::time::Duration;
use tracing::{info, warn};

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1/";
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai/";

/// Endpoint and credentials of one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub base_url: String,
    pub api_key_env: String,
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
}

impl ProviderSettings {
    pub fn openai() -> Self {
        Self {
            base_url: OPENAI_BASE_URL.to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            timeout_seconds: 300,
        }
    }

    pub fn gemini() -> Self {
        Self {
            base_url: GEMINI_BASE_URL.to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            api_key: None,
            timeout_seconds: 300,
        }
    }

    /// Configured key, else the key in the configured environment variable.
    pub fn resolve_key(&self) -> Result<String, ProviderError> {
        if let Some(key) = self.api_key.as_ref().filter(|k| !k.is_empty()) {
            return Ok(key.clone());
        }
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ProviderError::MissingKey(self.api_key_env.clone()))
    }

    /// `{base_url}/chat/completions`, tolerant of a missing trailing slash.
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

pub struct OpenAiCompatProvider {
    kind: ProviderKind,
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl OpenAiCompatProvider {
    pub fn new(kind: ProviderKind, settings: &ProviderSettings) -> Result<Self, ProviderError> {
        let api_key = settings.resolve_key()?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()?;
        Ok(Self {
            kind,
            client,
            endpoint: settings.endpoint(),
            api_key,
        })
    }

    /// Try to create the provider.
    ///
    /// Returns `None` when the key is missing; used for auto-detection during
    /// DI assembly.
    pub fn try_new(kind: ProviderKind, settings: &ProviderSettings) -> Option<Self> {
        match Self::new(kind, settings) {
            Ok(provider) => {
                info!(
                    provider = kind.as_str(),
                    endpoint = %provider.endpoint,
                    "Provider initialized"
                );
                Some(provider)
            }
            Err(e) => {
                warn!("{} provider not available: {}", kind.as_str(), e);
                None
            }
        }
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiCompatProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn create_session(
        &self,
        model: &Model,
        system_prompt: &str,
        schema: Option<ResponseSchema>,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(OpenAiCompatSession::new(
            self.client.clone(),
            self.endpoint.clone(),
            self.api_key.clone(),
            model.clone(),
            system_prompt,
            schema.as_ref(),
        )))
    }
}
