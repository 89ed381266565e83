use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::application::ports::{InferenceClient, TextExtractor};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub ollama_connected: bool,
    pub ollama_url: String,
}

/// Always answers 200; a backend that cannot be reached only degrades the
/// reported status.
pub async fn health_handler<E, C>(State(state): State<AppState<E, C>>) -> Json<HealthResponse>
where
    E: TextExtractor + 'static,
    C: InferenceClient + 'static,
{
    let health = state.inference_client.health().await;

    Json(HealthResponse {
        status: if health.reachable { "healthy" } else { "degraded" },
        ollama_connected: health.reachable,
        ollama_url: state.settings.ollama.base_url.clone(),
    })
}
