use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

pub type ProviderId = String;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeneratorMetadata {
    pub id: ProviderId,
    pub name: String,
    pub model: String,
    pub local: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PromptSpec {
    pub system: Option<String>,
    pub user: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GenerationOptions {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_tokens: Some(256),
            temperature: Some(0.4),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GenerationRequest {
    pub prompt: PromptSpec,
    pub options: GenerationOptions,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationResult {
    pub provider_id: ProviderId,
    pub model: String,
    pub text: String,
    pub latency: Duration,
    pub metadata: HashMap<String, String>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("transport error")]
    Transport,
    #[error("request timed out")]
    Timeout,
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response")]
    InvalidResponse,
    #[error("generator unavailable")]
    Unavailable,
    #[error("generator error: {0}")]
    Critical(String),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProviderConfig {
    OpenRouter {
        id: ProviderId,
        base_url: String,
        api_key: String,
        model: String,
    },
    Ollama {
        id: ProviderId,
        base_url: String,
        model: String,
    },
    Mock {
        id: ProviderId,
        text: String,
    },
}

impl ProviderConfig {
    pub fn id(&self) -> &ProviderId {
        match self {
            Self::OpenRouter { id, .. } => id,
            Self::Ollama { id, .. } => id,
            Self::Mock { id, .. } => id,
        }
    }
}

/// Optional text-generation capability. Callers must treat every error as
/// "no text available"; nothing in a lesson plan depends on it.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn metadata(&self) -> GeneratorMetadata;

    async fn generate(&self, request: GenerationRequest)
        -> Result<GenerationResult, GenerationError>;

    async fn health_check(&self) -> Result<(), GenerationError> {
        Ok(())
    }
}
