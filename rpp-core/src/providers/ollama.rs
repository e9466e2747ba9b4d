use crate::logging::{LogEvent, LogLevel, SharedEventLogger};
use crate::provider::{
    GenerationError, GenerationRequest, GenerationResult, GeneratorMetadata, ProviderId,
    TextGenerator,
};
use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::timeout;

/// Local Ollama server, read through its NDJSON streaming `/api/generate`.
pub struct OllamaProvider {
    id: ProviderId,
    client: Client,
    base_url: String,
    model: String,
    logger: SharedEventLogger,
    stream_timeout: Duration,
}

impl OllamaProvider {
    pub fn new(id: ProviderId, base_url: String, model: String, logger: SharedEventLogger) -> Self {
        let client = reqwest::ClientBuilder::new()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self::with_client(id, base_url, model, client, logger)
    }

    pub fn with_client(
        id: ProviderId,
        base_url: String,
        model: String,
        client: Client,
        logger: SharedEventLogger,
    ) -> Self {
        Self {
            id,
            client,
            base_url,
            model,
            logger,
            stream_timeout: Duration::from_secs(120),
        }
    }

    pub fn with_stream_timeout(mut self, stream_timeout: Duration) -> Self {
        self.stream_timeout = stream_timeout;
        self
    }

    /// Applies one NDJSON line to the accumulated text. Returns `true` on the
    /// terminating `done` line.
    fn apply_line(&self, line: &str, content: &mut String) -> Result<bool, GenerationError> {
        let value: serde_json::Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                self.logger.log(
                    LogEvent::new(LogLevel::Warn, "ollama.json.parse.error")
                        .with_field("error", e.to_string()),
                );
                return Ok(false);
            }
        };
        if let Some(err) = value.get("error").and_then(|v| v.as_str()) {
            return Err(GenerationError::Critical(err.to_string()));
        }
        if let Some(text) = value.get("response").and_then(|v| v.as_str()) {
            content.push_str(text);
        }
        Ok(value.get("done").and_then(|v| v.as_bool()) == Some(true))
    }
}

#[async_trait]
impl TextGenerator for OllamaProvider {
    fn metadata(&self) -> GeneratorMetadata {
        GeneratorMetadata {
            id: self.id.clone(),
            name: "OllamaProvider".to_string(),
            model: self.model.clone(),
            local: true,
        }
    }

    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResult, GenerationError> {
        let url = format!("{}/api/generate", self.base_url.trim_end_matches('/'));
        let mut options = serde_json::Map::new();
        if let Some(t) = request.options.temperature {
            options.insert("temperature".to_string(), serde_json::json!(t));
        }
        if let Some(n) = request.options.max_tokens {
            options.insert("num_predict".to_string(), serde_json::json!(n));
        }
        let payload = serde_json::json!({
            "model": self.model,
            "prompt": request.prompt.user,
            "system": request.prompt.system,
            "options": options,
            "stream": true
        });

        let start = std::time::Instant::now();
        let send_fut = self.client.post(url).json(&payload).send();
        let resp = match timeout(self.stream_timeout, send_fut).await {
            Ok(Ok(r)) => r,
            Ok(Err(e)) if e.is_timeout() => return Err(GenerationError::Timeout),
            Ok(Err(_)) => return Err(GenerationError::Transport),
            Err(_) => return Err(GenerationError::Timeout),
        };

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(GenerationError::Critical(format!(
                "Ollama Error {}: {}",
                status, body
            )));
        }
        let mut stream = resp.bytes_stream();

        let streamed = timeout(self.stream_timeout, async {
            let mut buffer: Vec<u8> = Vec::new();
            let mut content = String::new();
            let mut done = false;

            'read: while let Some(chunk) = stream.next().await {
                let chunk = chunk.map_err(|_| GenerationError::Transport)?;
                buffer.extend_from_slice(&chunk);

                while let Some(pos) = buffer.iter().position(|b| *b == b'\n') {
                    let line: Vec<u8> = buffer.drain(..=pos).collect();
                    let line = std::str::from_utf8(&line)
                        .map_err(|_| GenerationError::InvalidResponse)?
                        .trim();
                    if line.is_empty() {
                        continue;
                    }
                    if self.apply_line(line, &mut content)? {
                        done = true;
                        buffer.clear();
                        break 'read;
                    }
                }
            }

            // A final line without a trailing newline.
            let rest = std::str::from_utf8(&buffer)
                .map_err(|_| GenerationError::InvalidResponse)?
                .trim();
            if !rest.is_empty() {
                done = self.apply_line(rest, &mut content)? || done;
            }

            Ok::<_, GenerationError>((content, done))
        })
        .await;

        let (content, done) = match streamed {
            Ok(result) => result?,
            Err(_) => return Err(GenerationError::Timeout),
        };

        if !done {
            self.logger
                .log(LogEvent::new(LogLevel::Warn, "ollama.done.not_received"));
        }
        if content.trim().is_empty() {
            return Err(GenerationError::InvalidResponse);
        }

        Ok(GenerationResult {
            provider_id: self.id.clone(),
            model: self.model.clone(),
            text: content,
            latency: start.elapsed(),
            metadata: HashMap::new(),
        })
    }

    async fn health_check(&self) -> Result<(), GenerationError> {
        let url = format!("{}/api/tags", self.base_url.trim_end_matches('/'));
        let resp = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                GenerationError::Timeout
            } else {
                GenerationError::Transport
            }
        })?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(GenerationError::Unavailable)
        }
    }
}
