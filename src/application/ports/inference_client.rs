use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::Stream;

use crate::domain::InferenceResult;

pub type TokenStream =
    Pin<Box<dyn Stream<Item = Result<String, InferenceError>> + Send + 'static>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendHealth {
    pub reachable: bool,
}

#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Never fails: any transport error or non-success status reports the
    /// backend as unreachable.
    async fn health(&self) -> BackendHealth;

    async fn list_models(&self) -> Result<Vec<String>, InferenceError>;

    async fn generate(&self, prompt: &str, model: &str)
    -> Result<InferenceResult, InferenceError>;

    /// Streaming variant of `generate`; yields response fragments in order.
    async fn generate_stream(
        &self,
        prompt: &str,
        model: &str,
    ) -> Result<TokenStream, InferenceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("inference backend unavailable: {0}")]
    BackendUnavailable(String),
    #[error("model '{0}' not found on the inference backend")]
    ModelNotFound(String),
    #[error("inference backend did not respond within {}s", .0.as_secs())]
    Timeout(Duration),
    #[error("inference backend error: {0}")]
    Backend(String),
}

impl InferenceError {
    pub fn kind(&self) -> &'static str {
        match self {
            InferenceError::BackendUnavailable(_) => "backend_unavailable",
            InferenceError::ModelNotFound(_) => "model_not_found",
            InferenceError::Timeout(_) => "timeout",
            InferenceError::Backend(_) => "backend_error",
        }
    }
}
