//! LLM Gateway port
//!
//! Defines the interface for communicating with LLM providers.

use async_trait::async_trait;
use face_quorum_domain::{ChatMessage, Model, ResponseSchema};
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway for LLM communication
///
/// This port defines how the application layer communicates with LLM providers.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Create a session bound to a model and a system prompt.
    ///
    /// When `schema` is given, every reply of the session is requested as
    /// JSON conforming to it.
    async fn create_session(
        &self,
        model: &Model,
        system_prompt: &str,
        schema: Option<ResponseSchema>,
    ) -> Result<Box<dyn LlmSession>, GatewayError>;
}

/// An active LLM session
///
/// Sessions are stateless with respect to history: the caller sends the
/// full conversation on every call.
#[async_trait]
pub trait LlmSession: Send + Sync {
    /// Get the model used by this session
    fn model(&self) -> &Model;

    /// Send the conversation and get the reply text
    async fn send(&self, history: &[ChatMessage]) -> Result<String, GatewayError>;
}
