use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::application::ports::{InferenceClient, TextExtractor};
use crate::presentation::state::AppState;

use super::error::ApiError;

#[derive(Serialize)]
pub struct ModelsResponse {
    pub models: Vec<String>,
    pub current_model: String,
}

#[tracing::instrument(skip(state))]
pub async fn models_handler<E, C>(
    State(state): State<AppState<E, C>>,
) -> Result<Json<ModelsResponse>, ApiError>
where
    E: TextExtractor + 'static,
    C: InferenceClient + 'static,
{
    let models = state.inference_client.list_models().await?;
    tracing::debug!(count = models.len(), "Listed backend models");

    Ok(Json(ModelsResponse {
        models,
        current_model: state.summarization_service.default_model().to_string(),
    }))
}
