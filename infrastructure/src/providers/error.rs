//! Provider errors

use face_quorum_application::ports::llm_gateway::GatewayError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Response had no choices")]
    EmptyResponse,

    #[error("API key not set: {0}")]
    MissingKey(String),
}

impl From<ProviderError> for GatewayError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::Http(inner) if inner.is_timeout() => GatewayError::Timeout,
            ProviderError::Http(inner) if inner.is_connect() => {
                GatewayError::ConnectionError(inner.to_string())
            }
            ProviderError::Http(inner) if inner.is_decode() => {
                GatewayError::InvalidResponse(inner.to_string())
            }
            ProviderError::Http(inner) => GatewayError::RequestFailed(inner.to_string()),
            ProviderError::Status { .. } => GatewayError::RequestFailed(e.to_string()),
            ProviderError::EmptyResponse => GatewayError::InvalidResponse(e.to_string()),
            ProviderError::MissingKey(var) => GatewayError::MissingCredentials(var),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_maps_to_request_failed() {
        let err: GatewayError = ProviderError::Status {
            status: 429,
            body: "rate limited".to_string(),
        }
        .into();
        assert!(matches!(err, GatewayError::RequestFailed(m) if m.contains("429")));
    }

    #[test]
    fn test_missing_key_maps_to_credentials() {
        let err: GatewayError = ProviderError::MissingKey("GEMINI_API_KEY".to_string()).into();
        assert!(matches!(err, GatewayError::MissingCredentials(v) if v == "GEMINI_API_KEY"));
    }
}
