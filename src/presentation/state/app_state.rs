use std::sync::Arc;

use crate::application::ports::{InferenceClient, TextExtractor};
use crate::application::services::SummarizationService;
use crate::presentation::config::Settings;

pub struct AppState<E, C>
where
    E: TextExtractor,
    C: InferenceClient,
{
    pub summarization_service: Arc<SummarizationService<E, C>>,
    pub inference_client: Arc<C>,
    pub settings: Arc<Settings>,
}

impl<E, C> Clone for AppState<E, C>
where
    E: TextExtractor,
    C: InferenceClient,
{
    fn clone(&self) -> Self {
        Self {
            summarization_service: Arc::clone(&self.summarization_service),
            inference_client: Arc::clone(&self.inference_client),
            settings: Arc::clone(&self.settings),
        }
    }
}
