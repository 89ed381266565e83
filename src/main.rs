use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use precis::application::services::{PromptBuilder, SummarizationService};
use precis::infrastructure::llm::OllamaClient;
use precis::infrastructure::observability::{TracingConfig, init_tracing};
use precis::infrastructure::storage::ScratchDir;
use precis::infrastructure::text_processing::ExtractorFactory;
use precis::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Arc::new(Settings::load().context("failed to load settings")?);

    init_tracing(&TracingConfig::new(settings.environment, &settings.logging));

    let scratch_dir = ScratchDir::new(&settings.upload.scratch_dir)
        .with_context(|| format!("failed to prepare {}", settings.upload.scratch_dir))?;
    let extractor = Arc::new(ExtractorFactory::create(&settings.extraction));
    let inference_client =
        Arc::new(OllamaClient::new(&settings.ollama).context("failed to build Ollama client")?);

    let summarization_service = Arc::new(SummarizationService::new(
        extractor,
        Arc::clone(&inference_client),
        Arc::new(scratch_dir),
        PromptBuilder::new(settings.summarization.context_budget_chars),
        settings.ollama.default_model.clone(),
    ));

    tracing::info!(
        ollama_url = %inference_client.base_url(),
        default_model = %settings.ollama.default_model,
        scratch_dir = %settings.upload.scratch_dir,
        "Summarizer configured"
    );

    let state = AppState {
        summarization_service,
        inference_client,
        settings: Arc::clone(&settings),
    };

    let router = create_router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
