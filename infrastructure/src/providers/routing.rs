use super::{ProviderAdapter, ProviderKind};
use async_trait::async_trait;
use face_quorum_application::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use face_quorum_domain::{Model, ResponseSchema};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// Routing rules: an optional default provider and explicit model overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutingConfig {
    pub default: Option<String>,
    /// Model name to provider name
    pub routing: HashMap<String, String>,
}

pub struct RoutingGateway {
    providers: Vec<Arc<dyn ProviderAdapter>>,
    explicit_model_routing: HashMap<String, usize>,
    default_kind: ProviderKind,
}

impl RoutingGateway {
    pub fn new(providers: Vec<Arc<dyn ProviderAdapter>>, config: &RoutingConfig) -> Self {
        let mut explicit_model_routing = HashMap::new();

        for (model_name, provider_name) in &config.routing {
            let Some(target_kind) = ProviderKind::parse(provider_name) else {
                warn!(
                    model = %model_name,
                    provider = %provider_name,
                    "Unknown provider in routing table"
                );
                continue;
            };

            if let Some(idx) = providers.iter().position(|p| p.kind() == target_kind) {
                explicit_model_routing.insert(model_name.clone(), idx);
            }
        }

        Self {
            providers,
            explicit_model_routing,
            default_kind: config
                .default
                .as_deref()
                .and_then(ProviderKind::parse)
                .unwrap_or_default(),
        }
    }

    pub fn provider_kinds(&self) -> Vec<ProviderKind> {
        self.providers.iter().map(|p| p.kind()).collect()
    }

    /// Resolution order:
    ///  1. explicit routing entry for the model name
    ///  2. provider of the model's family (gpt, gemini)
    ///  3. provider of the default kind
    ///  4. first registered provider
    fn resolve_provider(&self, model: &Model) -> Result<&dyn ProviderAdapter, GatewayError> {
        if let Some(&idx) = self.explicit_model_routing.get(model.as_str()) {
            return Ok(self.providers[idx].as_ref());
        }

        let inferred_kind = if model.is_gemini() {
            Some(ProviderKind::Gemini)
        } else if model.is_gpt() {
            Some(ProviderKind::OpenAi)
        } else {
            None
        };
        if let Some(kind) = inferred_kind
            && let Some(p) = self.providers.iter().find(|p| p.kind() == kind)
        {
            return Ok(p.as_ref());
        }

        if let Some(p) = self
            .providers
            .iter()
            .find(|p| p.kind() == self.default_kind)
        {
            return Ok(p.as_ref());
        }

        self.providers
            .first()
            .map(|p| p.as_ref())
            .ok_or_else(|| GatewayError::ModelNotAvailable(format!("No provider for {}", model)))
    }
}

#[async_trait]
impl LlmGateway for RoutingGateway {
    async fn create_session(
        &self,
        model: &Model,
        system_prompt: &str,
        schema: Option<ResponseSchema>,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        self.resolve_provider(model)?
            .create_session(model, system_prompt, schema)
            .await
    }
}
