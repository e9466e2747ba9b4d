use crate::provider::{
    GenerationError, GenerationRequest, GenerationResult, GeneratorMetadata, ProviderId,
    TextGenerator,
};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;

/// OpenAI-compatible chat completions endpoint (OpenRouter and look-alikes).
pub struct OpenRouterProvider {
    id: ProviderId,
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenRouterProvider {
    pub fn new(id: ProviderId, base_url: String, api_key: String, model: String) -> Self {
        let client = reqwest::ClientBuilder::new()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self::with_client(id, base_url, api_key, model, client)
    }

    pub fn with_client(
        id: ProviderId,
        base_url: String,
        api_key: String,
        model: String,
        client: Client,
    ) -> Self {
        Self {
            id,
            client,
            base_url,
            api_key,
            model,
        }
    }
}

fn map_send_error(e: reqwest::Error) -> GenerationError {
    if e.is_timeout() {
        GenerationError::Timeout
    } else {
        GenerationError::Transport
    }
}

#[async_trait]
impl TextGenerator for OpenRouterProvider {
    fn metadata(&self) -> GeneratorMetadata {
        GeneratorMetadata {
            id: self.id.clone(),
            name: "OpenRouterProvider".to_string(),
            model: self.model.clone(),
            local: false,
        }
    }

    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResult, GenerationError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let mut messages = Vec::<serde_json::Value>::new();
        if let Some(sys) = &request.prompt.system {
            messages.push(serde_json::json!({"role": "system", "content": sys}));
        }
        messages.push(serde_json::json!({"role": "user", "content": request.prompt.user}));

        let mut payload = serde_json::json!({
            "model": self.model,
            "messages": messages,
            "temperature": request.options.temperature.unwrap_or(0.7),
        });
        if let Some(max_tokens) = request.options.max_tokens {
            payload["max_tokens"] = serde_json::json!(max_tokens);
        }

        let start = std::time::Instant::now();
        let resp = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = resp.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GenerationError::RateLimited);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GenerationError::Critical(format!(
                "OpenRouter Error {}: {}",
                status, body
            )));
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|_| GenerationError::InvalidResponse)?;
        let content = body
            .pointer("/choices/0/message/content")
            .and_then(|v| v.as_str())
            .ok_or(GenerationError::InvalidResponse)?;

        let mut metadata = HashMap::new();
        if let Some(tokens) = body.pointer("/usage/total_tokens").and_then(|v| v.as_u64()) {
            metadata.insert("total_tokens".to_string(), tokens.to_string());
        }

        Ok(GenerationResult {
            provider_id: self.id.clone(),
            model: self.model.clone(),
            text: content.to_string(),
            latency: start.elapsed(),
            metadata,
        })
    }

    async fn health_check(&self) -> Result<(), GenerationError> {
        let url = format!("{}/models", self.base_url.trim_end_matches('/'));
        let resp = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(map_send_error)?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(GenerationError::Unavailable)
        }
    }
}
