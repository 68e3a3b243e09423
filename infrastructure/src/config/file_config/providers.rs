//! Provider configuration from TOML (`[providers]` section)

use super::ConfigIssue;
use crate::providers::{ProviderKind, ProviderSettings, RoutingConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Overrides for one OpenAI-compatible endpoint; unset fields keep the
/// provider's built-in values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderEndpoint {
    /// Environment variable holding the API key
    pub api_key_env: Option<String>,
    /// Direct API key (not recommended; use the env var instead)
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl FileProviderEndpoint {
    pub fn apply(&self, mut settings: ProviderSettings) -> ProviderSettings {
        if let Some(env) = &self.api_key_env {
            settings.api_key_env = env.clone();
        }
        if self.api_key.is_some() {
            settings.api_key = self.api_key.clone();
        }
        if let Some(url) = &self.base_url {
            settings.base_url = url.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            settings.timeout_seconds = timeout;
        }
        settings
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// Provider used for models of no known family (`openai` or `gemini`)
    pub default: Option<String>,
    /// Model name to provider name overrides
    pub routing: HashMap<String, String>,
    pub openai: FileProviderEndpoint,
    pub gemini: FileProviderEndpoint,
}

impl FileProvidersConfig {
    pub fn routing_config(&self) -> RoutingConfig {
        RoutingConfig {
            default: self.default.clone(),
            routing: self.routing.clone(),
        }
    }

    pub fn settings(&self, kind: ProviderKind) -> ProviderSettings {
        match kind {
            ProviderKind::OpenAi => self.openai.apply(ProviderSettings::openai()),
            ProviderKind::Gemini => self.gemini.apply(ProviderSettings::gemini()),
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if let Some(default) = &self.default
            && ProviderKind::parse(default).is_none()
        {
            issues.push(ConfigIssue::new(
                "providers.default",
                format!("unknown provider '{}' (expected openai or gemini)", default),
            ));
        }
        let mut routed: Vec<_> = self.routing.iter().collect();
        routed.sort();
        for (model, provider) in routed {
            if ProviderKind::parse(provider).is_none() {
                issues.push(ConfigIssue::new(
                    format!("providers.routing.{}", model),
                    format!("unknown provider '{}'", provider),
                ));
            }
        }
        let endpoints = [
            ("providers.openai", &self.openai),
            ("providers.gemini", &self.gemini),
        ];
        for (field, endpoint) in endpoints {
            if endpoint.base_url.as_deref().is_some_and(|url| url.trim().is_empty()) {
                issues.push(ConfigIssue::new(format!("{}.base_url", field), "must not be empty"));
            }
        }
        issues
    }
}
