use crate::provider::{
    GenerationError, GenerationRequest, GenerationResult, GeneratorMetadata, ProviderId,
    TextGenerator,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// Returns the same text for every prompt.
pub struct MockGenerator {
    id: ProviderId,
    text: String,
}

impl MockGenerator {
    pub fn new(id: impl Into<ProviderId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    fn metadata(&self) -> GeneratorMetadata {
        GeneratorMetadata {
            id: self.id.clone(),
            name: "MockGenerator".to_string(),
            model: "mock".to_string(),
            local: true,
        }
    }

    async fn generate(
        &self,
        _request: GenerationRequest,
    ) -> Result<GenerationResult, GenerationError> {
        Ok(GenerationResult {
            provider_id: self.id.clone(),
            model: "mock".to_string(),
            text: self.text.clone(),
            latency: Duration::from_millis(1),
            metadata: HashMap::new(),
        })
    }
}

/// Fails every call with the configured error.
pub struct FailingGenerator {
    error: GenerationError,
}

impl FailingGenerator {
    pub fn new(error: GenerationError) -> Self {
        Self { error }
    }
}

impl Default for FailingGenerator {
    fn default() -> Self {
        Self::new(GenerationError::Unavailable)
    }
}

#[async_trait]
impl TextGenerator for FailingGenerator {
    fn metadata(&self) -> GeneratorMetadata {
        GeneratorMetadata {
            id: "failing".to_string(),
            name: "FailingGenerator".to_string(),
            model: "none".to_string(),
            local: true,
        }
    }

    async fn generate(
        &self,
        _request: GenerationRequest,
    ) -> Result<GenerationResult, GenerationError> {
        Err(self.error.clone())
    }

    async fn health_check(&self) -> Result<(), GenerationError> {
        Err(self.error.clone())
    }
}

/// Sleeps before answering; used to exercise caller-side timeouts.
pub struct StallingGenerator {
    delay: Duration,
}

impl StallingGenerator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl TextGenerator for StallingGenerator {
    fn metadata(&self) -> GeneratorMetadata {
        GeneratorMetadata {
            id: "stalling".to_string(),
            name: "StallingGenerator".to_string(),
            model: "none".to_string(),
            local: true,
        }
    }

    async fn generate(
        &self,
        _request: GenerationRequest,
    ) -> Result<GenerationResult, GenerationError> {
        tokio::time::sleep(self.delay).await;
        Ok(GenerationResult {
            provider_id: "stalling".to_string(),
            model: "none".to_string(),
            text: "terlambat".to_string(),
            latency: self.delay,
            metadata: HashMap::new(),
        })
    }
}
