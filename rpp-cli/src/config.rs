use anyhow::Context;
use rpp_core::provider::ProviderConfig;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "rpp.toml";

#[derive(Debug, Default, serde::Deserialize)]
pub struct GlobalConfig {
    pub runtime: Option<RuntimeConfig>,
    pub providers: Option<ProvidersConfig>,
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct RuntimeConfig {
    pub augment_timeout_ms: Option<u64>,
    pub log_dir: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct ProvidersConfig {
    /// "openrouter" or "ollama"; the first configured one when absent.
    pub default: Option<String>,
    pub openrouter: Option<OpenRouterConfig>,
    pub ollama: Option<OllamaConfig>,
}

#[derive(Debug, serde::Deserialize)]
pub struct OpenRouterConfig {
    pub base_url: String,
    pub api_key_env: String,
    pub model: String,
}

#[derive(Debug, serde::Deserialize)]
pub struct OllamaConfig {
    pub base_url: String,
    pub model: String,
}

/// An explicit path must exist; the default path is optional.
pub fn load_global_config(path: Option<&Path>) -> anyhow::Result<GlobalConfig> {
    let (path, required) = match path {
        Some(p) => (p, true),
        None => (Path::new(DEFAULT_CONFIG_PATH), false),
    };
    let raw = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(GlobalConfig::default())
        }
        Err(e) => {
            return Err(e).with_context(|| format!("reading config {}", path.display()));
        }
    };
    parse_config(&raw).with_context(|| format!("parsing config {}", path.display()))
}

pub fn parse_config(raw: &str) -> anyhow::Result<GlobalConfig> {
    Ok(toml::from_str(raw)?)
}

impl GlobalConfig {
    pub fn augment_timeout(&self) -> Option<Duration> {
        self.runtime
            .as_ref()
            .and_then(|r| r.augment_timeout_ms)
            .map(Duration::from_millis)
    }

    pub fn log_dir(&self) -> Option<String> {
        self.runtime.as_ref().and_then(|r| r.log_dir.clone())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.runtime.as_ref().and_then(|r| r.log_level.as_deref())
    }

    /// Resolves the configured generator. OpenRouter is skipped when its API
    /// key variable is unset, so generation runs template-only.
    pub fn provider_config(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Option<ProviderConfig> {
        let providers = self.providers.as_ref()?;
        let openrouter = providers.openrouter.as_ref().and_then(|or| {
            env(&or.api_key_env).map(|api_key| ProviderConfig::OpenRouter {
                id: "openrouter".to_string(),
                base_url: or.base_url.clone(),
                api_key,
                model: or.model.clone(),
            })
        });
        let ollama = providers.ollama.as_ref().map(|ol| ProviderConfig::Ollama {
            id: "ollama".to_string(),
            base_url: ol.base_url.clone(),
            model: ol.model.clone(),
        });
        match providers.default.as_deref() {
            Some("openrouter") => openrouter,
            Some("ollama") => ollama,
            _ => openrouter.or(ollama),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[runtime]
augment_timeout_ms = 1500
log_dir = "logs"

[providers]
default = "ollama"

[providers.openrouter]
base_url = "https://openrouter.ai/api/v1"
api_key_env = "OPENROUTER_API_KEY"
model = "gpt-4o-mini"

[providers.ollama]
base_url = "http://localhost:11434"
model = "llama3"
"#;

    #[test]
    fn parses_runtime_section() {
        let gc = parse_config(SAMPLE).unwrap();
        assert_eq!(gc.augment_timeout(), Some(Duration::from_millis(1500)));
        assert_eq!(gc.log_dir().as_deref(), Some("logs"));
        assert_eq!(gc.log_level(), None);
    }

    #[test]
    fn default_provider_is_honoured() {
        let gc = parse_config(SAMPLE).unwrap();
        let cfg = gc.provider_config(|_| Some("sk".to_string())).unwrap();
        assert_eq!(cfg.id(), "ollama");
    }

    #[test]
    fn openrouter_needs_api_key() {
        let gc = parse_config(&SAMPLE.replace("default = \"ollama\"", "default = \"openrouter\""))
            .unwrap();
        assert!(gc.provider_config(|_| None).is_none());
        match gc.provider_config(|k| (k == "OPENROUTER_API_KEY").then(|| "sk".to_string())) {
            Some(ProviderConfig::OpenRouter { api_key, .. }) => assert_eq!(api_key, "sk"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn empty_config_has_no_provider() {
        let gc = parse_config("").unwrap();
        assert!(gc.provider_config(|_| None).is_none());
        assert!(gc.augment_timeout().is_none());
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_global_config(Some(&missing)).is_err());
    }
}
