use futures::StreamExt;

use precis::application::ports::{InferenceClient, InferenceError};
use precis::infrastructure::llm::OllamaClient;

use crate::fake_ollama::{
    BLANK_MODEL, BROKEN_MODEL, MISSING_MODEL, SLOW_MODEL, SUMMARY, ollama_settings,
    spawn_fake_ollama, spawn_unhealthy_ollama, unreachable_base_url,
};

#[tokio::test]
async fn given_running_backend_when_checking_health_then_reachable() {
    let (base_url, _) = spawn_fake_ollama().await;
    let client = OllamaClient::new(&ollama_settings(&base_url)).unwrap();

    assert!(client.health().await.reachable);
}

#[tokio::test]
async fn given_nothing_listening_when_checking_health_then_unreachable() {
    let base_url = unreachable_base_url().await;
    let client = OllamaClient::new(&ollama_settings(&base_url)).unwrap();

    assert!(!client.health().await.reachable);
}

#[tokio::test]
async fn given_backend_answering_with_error_status_when_checking_health_then_unreachable() {
    let base_url = spawn_unhealthy_ollama().await;
    let client = OllamaClient::new(&ollama_settings(&base_url)).unwrap();

    assert!(!client.health().await.reachable);
}

#[tokio::test]
async fn given_trailing_slash_in_base_url_when_created_then_trimmed() {
    let client = OllamaClient::new(&ollama_settings("http://localhost:11434/")).unwrap();

    assert_eq!(client.base_url(), "http://localhost:11434");
}

#[tokio::test]
async fn given_installed_models_when_listing_then_returns_names_in_order() {
    let (base_url, _) = spawn_fake_ollama().await;
    let client = OllamaClient::new(&ollama_settings(&base_url)).unwrap();

    let models = client.list_models().await.unwrap();

    assert_eq!(models, vec!["llama2:latest", "mistral:7b"]);
}

#[tokio::test]
async fn given_nothing_listening_when_listing_models_then_backend_unavailable() {
    let base_url = unreachable_base_url().await;
    let client = OllamaClient::new(&ollama_settings(&base_url)).unwrap();

    let result = client.list_models().await;

    assert!(matches!(result, Err(InferenceError::BackendUnavailable(_))));
}

#[tokio::test]
async fn given_slow_model_list_when_listing_models_then_backend_unavailable() {
    let base_url = spawn_unhealthy_ollama().await;
    let mut settings = ollama_settings(&base_url);
    settings.list_timeout_secs = 1;
    let client = OllamaClient::new(&settings).unwrap();

    let error = client.list_models().await.unwrap_err();

    assert!(matches!(error, InferenceError::BackendUnavailable(_)));
    assert_eq!(error.kind(), "backend_unavailable");
}

#[tokio::test]
async fn given_prompt_when_generating_then_sends_non_streaming_request_and_trims_response() {
    let (base_url, fake) = spawn_fake_ollama().await;
    let client = OllamaClient::new(&ollama_settings(&base_url)).unwrap();

    let result = client.generate("Summarize this.", "llama2").await.unwrap();

    assert_eq!(result.summary, SUMMARY);
    assert_eq!(result.model, "llama2");
    let request = fake.last_request().unwrap();
    assert_eq!(request["model"], "llama2");
    assert_eq!(request["prompt"], "Summarize this.");
    assert_eq!(request["stream"], false);
    assert!(request.get("options").is_none());
}

#[tokio::test]
async fn given_max_tokens_when_generating_then_sends_num_predict() {
    let (base_url, fake) = spawn_fake_ollama().await;
    let mut settings = ollama_settings(&base_url);
    settings.max_tokens = Some(256);
    let client = OllamaClient::new(&settings).unwrap();

    client.generate("Summarize this.", "llama2").await.unwrap();

    assert_eq!(fake.last_request().unwrap()["options"]["num_predict"], 256);
}

#[tokio::test]
async fn given_unknown_model_when_generating_then_model_not_found() {
    let (base_url, _) = spawn_fake_ollama().await;
    let client = OllamaClient::new(&ollama_settings(&base_url)).unwrap();

    let result = client.generate("prompt", MISSING_MODEL).await;

    match result {
        Err(InferenceError::ModelNotFound(model)) => assert_eq!(model, MISSING_MODEL),
        other => panic!("expected ModelNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn given_backend_failure_when_generating_then_backend_error_carries_status() {
    let (base_url, _) = spawn_fake_ollama().await;
    let client = OllamaClient::new(&ollama_settings(&base_url)).unwrap();

    let result = client.generate("prompt", BROKEN_MODEL).await;

    match result {
        Err(InferenceError::Backend(message)) => {
            assert!(message.contains("500"));
            assert!(message.contains("llama runner crashed"));
        }
        other => panic!("expected Backend error, got {other:?}"),
    }
}

#[tokio::test]
async fn given_blank_response_when_generating_then_backend_error() {
    let (base_url, _) = spawn_fake_ollama().await;
    let client = OllamaClient::new(&ollama_settings(&base_url)).unwrap();

    let result = client.generate("prompt", BLANK_MODEL).await;

    assert!(matches!(result, Err(InferenceError::Backend(_))));
}

#[tokio::test]
async fn given_slow_backend_when_generating_then_times_out() {
    let (base_url, _) = spawn_fake_ollama().await;
    let client = OllamaClient::new(&ollama_settings(&base_url)).unwrap();

    let result = client.generate("prompt", SLOW_MODEL).await;

    match result {
        Err(error @ InferenceError::Timeout(_)) => assert_eq!(error.kind(), "timeout"),
        other => panic!("expected Timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn given_nothing_listening_when_generating_then_backend_unavailable() {
    let base_url = unreachable_base_url().await;
    let client = OllamaClient::new(&ollama_settings(&base_url)).unwrap();

    let result = client.generate("prompt", "llama2").await;

    assert!(matches!(result, Err(InferenceError::BackendUnavailable(_))));
}

#[tokio::test]
async fn given_ndjson_split_across_chunks_when_streaming_then_yields_fragments_in_order() {
    let (base_url, fake) = spawn_fake_ollama().await;
    let client = OllamaClient::new(&ollama_settings(&base_url)).unwrap();

    let stream = client.generate_stream("prompt", "llama2").await.unwrap();
    let tokens: Vec<String> = stream.map(|token| token.unwrap()).collect().await;

    assert_eq!(tokens, vec!["The document", " covers quarterly", " results."]);
    assert_eq!(tokens.concat(), SUMMARY);
    assert_eq!(fake.last_request().unwrap()["stream"], true);
}

#[tokio::test]
async fn given_unknown_model_when_streaming_then_fails_before_first_token() {
    let (base_url, _) = spawn_fake_ollama().await;
    let client = OllamaClient::new(&ollama_settings(&base_url)).unwrap();

    let result = client.generate_stream("prompt", MISSING_MODEL).await;

    assert!(matches!(result, Err(InferenceError::ModelNotFound(_))));
}
