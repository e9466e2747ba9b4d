mod mock;
mod ollama;
mod openrouter;


pub use mock::{FailingGenerator, MockGenerator, StallingGenerator};
pub use ollama::OllamaProvider;
pub use openrouter::OpenRouterProvider;

use crate::logging::SharedEventLogger;
use crate::provider::{ProviderConfig, TextGenerator};
use std::sync::Arc;

pub fn create_generator(config: ProviderConfig, logger: SharedEventLogger) -> Arc<dyn TextGenerator> {
    match config {
        ProviderConfig::OpenRouter {
            id,
            base_url,
            api_key,
            model,
        } => Arc::new(OpenRouterProvider::new(id, base_url, api_key, model)),
        ProviderConfig::Ollama {
            id,
            base_url,
            model,
        } => Arc::new(OllamaProvider::new(id, base_url, model, logger)),
        ProviderConfig::Mock { id, text } => Arc::new(MockGenerator::new(id, text)),
    }
}
