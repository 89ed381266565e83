use std::time::Duration;

use async_trait::async_trait;
use futures::stream::StreamExt;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::application::ports::{BackendHealth, InferenceClient, InferenceError, TokenStream};
use crate::domain::InferenceResult;
use crate::infrastructure::observability::log_preview;
use crate::presentation::config::OllamaSettings;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for a local Ollama server (`/api/tags`, `/api/generate`).
pub struct OllamaClient {
    client: Client,
    base_url: String,
    health_timeout: Duration,
    list_timeout: Duration,
    generate_timeout: Duration,
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerateOptions>,
}

#[derive(Serialize)]
struct GenerateOptions {
    num_predict: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Deserialize)]
struct ModelTag {
    name: String,
}

impl OllamaClient {
    pub fn new(settings: &OllamaSettings) -> Result<Self, InferenceError> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| InferenceError::Backend(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            health_timeout: settings.health_timeout(),
            list_timeout: settings.list_timeout(),
            generate_timeout: settings.generate_timeout(),
            max_tokens: settings.max_tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request_body<'a>(&self, prompt: &'a str, model: &'a str, stream: bool) -> GenerateRequest<'a> {
        GenerateRequest {
            model,
            prompt,
            stream,
            options: self.max_tokens.map(|num_predict| GenerateOptions { num_predict }),
        }
    }

    async fn send_generate(
        &self,
        prompt: &str,
        model: &str,
        stream: bool,
    ) -> Result<reqwest::Response, InferenceError> {
        tracing::debug!(
            model,
            stream,
            prompt = %log_preview(prompt),
            "Sending generate request"
        );

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .timeout(self.generate_timeout)
            .json(&self.request_body(prompt, model, stream))
            .send()
            .await
            .map_err(|e| transport_error(e, self.generate_timeout))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(InferenceError::ModelNotFound(model.to_string()));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::Backend(format!("HTTP {status}: {body}")));
        }

        Ok(response)
    }
}

fn transport_error(error: reqwest::Error, timeout: Duration) -> InferenceError {
    if error.is_timeout() {
        InferenceError::Timeout(timeout)
    } else if error.is_connect() {
        InferenceError::BackendUnavailable(error.to_string())
    } else {
        InferenceError::Backend(error.to_string())
    }
}

enum StreamLine {
    Token(String),
    Done,
    Skip,
}

fn parse_stream_line(line: &[u8]) -> Result<StreamLine, InferenceError> {
    let line = String::from_utf8_lossy(line);
    let line = line.trim();
    if line.is_empty() {
        return Ok(StreamLine::Skip);
    }

    let chunk: GenerateResponse = serde_json::from_str(line)
        .map_err(|e| InferenceError::Backend(format!("malformed stream line: {e}")))?;

    if let Some(error) = chunk.error {
        return Err(InferenceError::Backend(error));
    }
    if chunk.done {
        return Ok(StreamLine::Done);
    }
    match chunk.response {
        Some(token) if !token.is_empty() => Ok(StreamLine::Token(token)),
        _ => Ok(StreamLine::Skip),
    }
}

#[async_trait]
impl InferenceClient for OllamaClient {
    async fn health(&self) -> BackendHealth {
        let result = self
            .client
            .get(format!("{}/", self.base_url))
            .timeout(self.health_timeout)
            .send()
            .await;

        let reachable = match result {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::warn!(error = %e, base_url = %self.base_url, "Ollama health check failed");
                false
            }
        };

        BackendHealth { reachable }
    }

    async fn list_models(&self) -> Result<Vec<String>, InferenceError> {
        let response = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .timeout(self.list_timeout)
            .send()
            .await
            .map_err(|e| InferenceError::BackendUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::Backend(format!("HTTP {status}: {body}")));
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::Backend(format!("invalid model list: {e}")))?;

        Ok(tags.models.into_iter().map(|tag| tag.name).collect())
    }

    #[tracing::instrument(skip(self, prompt), fields(prompt_chars = prompt.chars().count()))]
    async fn generate(
        &self,
        prompt: &str,
        model: &str,
    ) -> Result<InferenceResult, InferenceError> {
        let response = self.send_generate(prompt, model, false).await?;

        let body: GenerateResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                InferenceError::Timeout(self.generate_timeout)
            } else {
                InferenceError::Backend(format!("invalid generate response: {e}"))
            }
        })?;

        if let Some(error) = body.error {
            return Err(InferenceError::Backend(error));
        }

        let summary = body.response.as_deref().map(str::trim).unwrap_or_default();
        if summary.is_empty() {
            return Err(InferenceError::Backend(
                "empty response from Ollama".to_string(),
            ));
        }

        tracing::debug!(summary = %log_preview(summary), "Generate request complete");

        Ok(InferenceResult {
            summary: summary.to_string(),
            model: body.model.unwrap_or_else(|| model.to_string()),
        })
    }

    async fn generate_stream(
        &self,
        prompt: &str,
        model: &str,
    ) -> Result<TokenStream, InferenceError> {
        let response = self.send_generate(prompt, model, true).await?;
        let timeout = self.generate_timeout;
        let mut body = response.bytes_stream();

        let stream = async_stream::stream! {
            let mut buffer: Vec<u8> = Vec::new();

            while let Some(chunk) = body.next().await {
                match chunk {
                    Ok(bytes) => buffer.extend_from_slice(&bytes),
                    Err(e) => {
                        yield Err(transport_error(e, timeout));
                        return;
                    }
                }

                while let Some(newline) = buffer.iter().position(|b| *b == b'\n') {
                    let line: Vec<u8> = buffer.drain(..=newline).collect();
                    match parse_stream_line(&line) {
                        Ok(StreamLine::Token(token)) => yield Ok(token),
                        Ok(StreamLine::Skip) => {}
                        Ok(StreamLine::Done) => return,
                        Err(e) => {
                            yield Err(e);
                            return;
                        }
                    }
                }
            }

            match parse_stream_line(&buffer) {
                Ok(StreamLine::Token(token)) => yield Ok(token),
                Ok(StreamLine::Skip) | Ok(StreamLine::Done) => {}
                Err(e) => yield Err(e),
            }
        };

        Ok(Box::pin(stream))
    }
}
