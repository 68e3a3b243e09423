//! Model providers
//!
//! Each provider adapter opens sessions for the models it serves; the
//! [`RoutingGateway`](routing::RoutingGateway) picks an adapter per model.

pub mod error;
pub mod openai_compat;
pub mod routing;

pub use openai_compat::{GEMINI_BASE_URL, OPENAI_BASE_URL, ProviderSettings};
pub use routing::RoutingConfig;

use async_trait::async_trait;
use face_quorum_application::ports::llm_gateway::{GatewayError, LlmSession};
use face_quorum_domain::{Model, ResponseSchema};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    #[default]
    OpenAi,
    Gemini,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Gemini => "gemini",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "openai" => Some(ProviderKind::OpenAi),
            "gemini" | "google" => Some(ProviderKind::Gemini),
            _ => None,
        }
    }
}

#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    fn kind(&self) -> ProviderKind;
    async fn create_session(
        &self,
        model: &Model,
        system_prompt: &str,
        schema: Option<ResponseSchema>,
    ) -> Result<Box<dyn LlmSession>, GatewayError>;
}
