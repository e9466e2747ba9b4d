use httpmock::prelude::*;
use rpp_core::logging::NoopEventLogger;
use rpp_core::provider::{
    GenerationError, GenerationOptions, GenerationRequest, PromptSpec, TextGenerator,
};
use rpp_core::providers::{OllamaProvider, OpenRouterProvider};
use std::sync::Arc;
use std::time::Duration;

fn request() -> GenerationRequest {
    GenerationRequest {
        prompt: PromptSpec {
            system: Some("Anda adalah asisten guru.".to_string()),
            user: "Tulis gambaran pelajaran pecahan".to_string(),
        },
        options: GenerationOptions::default(),
    }
}

fn openrouter(server: &MockServer) -> OpenRouterProvider {
    OpenRouterProvider::with_client(
        "or".to_string(),
        server.base_url(),
        "sk-test".to_string(),
        "gpt-4o-mini".to_string(),
        reqwest::Client::new(),
    )
}

fn ollama(server: &MockServer) -> OllamaProvider {
    OllamaProvider::with_client(
        "ol".to_string(),
        server.base_url(),
        "llama3".to_string(),
        reqwest::Client::new(),
        Arc::new(NoopEventLogger),
    )
}

#[test]
fn provider_metadata() {
    let or = OpenRouterProvider::new(
        "or".to_string(),
        "https://openrouter.ai/api/v1".to_string(),
        "sk-test".to_string(),
        "gpt-4o-mini".to_string(),
    );
    let m = or.metadata();
    assert_eq!(m.id, "or");
    assert_eq!(m.model, "gpt-4o-mini");
    assert!(!m.local);

    let ol = OllamaProvider::new(
        "ol".to_string(),
        "http://localhost:11434".to_string(),
        "llama3".to_string(),
        Arc::new(NoopEventLogger),
    );
    assert!(ol.metadata().local);
}

#[tokio::test]
async fn openrouter_returns_first_choice() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("authorization", "Bearer sk-test");
            then.status(200).json_body(serde_json::json!({
                "choices": [{"message": {"content": "Mari belajar pecahan."}}],
                "usage": {"total_tokens": 42}
            }));
        })
        .await;

    let result = openrouter(&server).generate(request()).await.unwrap();
    mock.assert_async().await;
    assert_eq!(result.text, "Mari belajar pecahan.");
    assert_eq!(result.provider_id, "or");
    assert_eq!(result.metadata.get("total_tokens").map(String::as_str), Some("42"));
}

#[tokio::test]
async fn openrouter_maps_http_failures() {
    let server = MockServer::start_async().await;
    let mut limited = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(429);
        })
        .await;
    assert_eq!(
        openrouter(&server).generate(request()).await.unwrap_err(),
        GenerationError::RateLimited
    );
    limited.delete_async().await;

    let mut broken = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(500).body("boom");
        })
        .await;
    match openrouter(&server).generate(request()).await.unwrap_err() {
        GenerationError::Critical(msg) => assert!(msg.contains("boom")),
        other => panic!("expected Critical, got {other:?}"),
    }
    broken.delete_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(serde_json::json!({"choices": []}));
        })
        .await;
    assert_eq!(
        openrouter(&server).generate(request()).await.unwrap_err(),
        GenerationError::InvalidResponse
    );
}

#[tokio::test]
async fn ollama_streaming_success() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/generate");
            then.status(200)
                .header("content-type", "application/x-ndjson")
                .body(
                    r#"{"response":"Mari","done":false}
{"response":" belajar","done":false}
{"response":" pecahan.","done":true}
"#,
                );
        })
        .await;

    let result = ollama(&server).generate(request()).await.unwrap();
    assert_eq!(result.text, "Mari belajar pecahan.");
    assert_eq!(result.model, "llama3");
}

#[tokio::test]
async fn ollama_streaming_without_done_or_trailing_newline() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/generate");
            then.status(200).body(
                r#"{"response":"Halo","done":false}
not json
{"response":" semua"}"#,
            );
        })
        .await;

    let result = ollama(&server).generate(request()).await.unwrap();
    assert_eq!(result.text, "Halo semua");
}

#[tokio::test]
async fn ollama_stream_error_line() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/generate");
            then.status(200).body(
                r#"{"response":"Halo","done":false}
{"error":"model not found","done":true}
"#,
            );
        })
        .await;

    assert_eq!(
        ollama(&server).generate(request()).await.unwrap_err(),
        GenerationError::Critical("model not found".to_string())
    );
}

#[tokio::test]
async fn ollama_empty_stream_is_invalid() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/generate");
            then.status(200).body("{\"response\":\"  \",\"done\":true}\n");
        })
        .await;

    assert_eq!(
        ollama(&server).generate(request()).await.unwrap_err(),
        GenerationError::InvalidResponse
    );
}

#[tokio::test]
async fn ollama_stream_timeout() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/generate");
            then.status(200)
                .delay(Duration::from_secs(2))
                .body("{\"response\":\"Halo\",\"done\":true}\n");
        })
        .await;

    let provider = ollama(&server).with_stream_timeout(Duration::from_millis(200));
    assert_eq!(
        provider.generate(request()).await.unwrap_err(),
        GenerationError::Timeout
    );
}

#[tokio::test]
async fn ollama_health_check() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/tags");
            then.status(200).json_body(serde_json::json!({"models": []}));
        })
        .await;
    assert!(ollama(&server).health_check().await.is_ok());
}
