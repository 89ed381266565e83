use std::path::Path;
use std::sync::Arc;

use crate::application::ports::{
    ExtractionInput, ExtractorError, InferenceClient, InferenceError, ScratchArtifact, ScratchError,
    ScratchStore, TextExtractor, TokenStream,
};
use crate::domain::{
    ExtractedText, FileType, RequestStage, SummaryMetadata, SummaryPrompt, SummaryResponse,
    UploadedDocument,
};
use crate::infrastructure::observability::log_preview;

use super::prompt_builder::{PromptBuilder, normalize_max_words};

#[derive(Debug, Clone)]
pub struct SummarizeRequest {
    pub filename: String,
    pub data: Vec<u8>,
    pub model: Option<String>,
    /// Target summary length in words; zero or negative means unlimited.
    pub max_length: Option<i64>,
}

pub struct SummaryStream {
    pub metadata: SummaryMetadata,
    pub tokens: TokenStream,
}

/// Runs one upload through type validation, extraction, prompt building and
/// inference. Holds no per-request state.
pub struct SummarizationService<E, C>
where
    E: TextExtractor,
    C: InferenceClient,
{
    extractor: Arc<E>,
    inference_client: Arc<C>,
    scratch_store: Arc<dyn ScratchStore>,
    prompt_builder: PromptBuilder,
    default_model: String,
}

struct PreparedSummary {
    document: UploadedDocument,
    extracted: ExtractedText,
    prompt: SummaryPrompt,
    model: String,
    // Held until the request finishes; dropping it removes the file.
    _scratch: Option<Box<dyn ScratchArtifact>>,
}

impl<E, C> SummarizationService<E, C>
where
    E: TextExtractor,
    C: InferenceClient,
{
    pub fn new(
        extractor: Arc<E>,
        inference_client: Arc<C>,
        scratch_store: Arc<dyn ScratchStore>,
        prompt_builder: PromptBuilder,
        default_model: String,
    ) -> Self {
        Self {
            extractor,
            inference_client,
            scratch_store,
            prompt_builder,
            default_model,
        }
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    #[tracing::instrument(
        skip(self, request),
        fields(filename = %request.filename, bytes = request.data.len())
    )]
    pub async fn summarize(
        &self,
        request: SummarizeRequest,
    ) -> Result<SummaryResponse, SummarizeError> {
        let prepared = self.prepare(&request).await?;

        let result = self
            .inference_client
            .generate(&prepared.prompt.text, &prepared.model)
            .await
            .map_err(SummarizeError::Inference)?;
        tracing::debug!(
            stage = %RequestStage::Inferred,
            backend_model = %result.model,
            "Summary generated"
        );

        let response = SummaryResponse {
            filename: prepared.document.filename.clone(),
            file_type: prepared.document.file_type.as_extension().to_string(),
            model: prepared.model.clone(),
            original_length: prepared.extracted.char_count(),
            summary_length: result.summary.chars().count(),
            summary: result.summary,
        };

        tracing::info!(
            stage = %RequestStage::Responded,
            document_id = %prepared.document.id,
            model = %response.model,
            original_length = response.original_length,
            summary_length = response.summary_length,
            "Document summarized"
        );

        Ok(response)
    }

    /// Same pipeline as `summarize`, but hands back the backend's token
    /// stream instead of waiting for the complete summary.
    #[tracing::instrument(
        skip(self, request),
        fields(filename = %request.filename, bytes = request.data.len())
    )]
    pub async fn summarize_stream(
        &self,
        request: SummarizeRequest,
    ) -> Result<SummaryStream, SummarizeError> {
        let prepared = self.prepare(&request).await?;

        let tokens = self
            .inference_client
            .generate_stream(&prepared.prompt.text, &prepared.model)
            .await
            .map_err(SummarizeError::Inference)?;

        Ok(SummaryStream {
            metadata: SummaryMetadata {
                filename: prepared.document.filename.clone(),
                file_type: prepared.document.file_type.as_extension().to_string(),
                model: prepared.model.clone(),
                original_length: prepared.extracted.char_count(),
            },
            tokens,
        })
    }

    async fn prepare(&self, request: &SummarizeRequest) -> Result<PreparedSummary, SummarizeError> {
        tracing::debug!(stage = %RequestStage::Received, "Summarize request received");

        let file_type = FileType::from_filename(&request.filename).ok_or_else(|| {
            SummarizeError::UnsupportedFormat {
                extension: display_extension(&request.filename),
            }
        })?;
        let document = UploadedDocument::new(
            request.filename.clone(),
            file_type,
            request.data.len() as u64,
        );
        tracing::debug!(
            stage = %RequestStage::TypeValidated,
            document_id = %document.id,
            file_type = %file_type,
            "File type accepted"
        );

        let scratch = if self.extractor.needs_scratch_file(file_type) {
            let artifact = self.scratch_store.persist(&request.data, file_type).await?;
            tracing::debug!(path = %artifact.path().display(), "Upload written to scratch file");
            Some(artifact)
        } else {
            None
        };

        let input = match scratch.as_deref() {
            Some(artifact) => ExtractionInput::with_scratch_file(&request.data, artifact.path()),
            None => ExtractionInput::in_memory(&request.data),
        };
        let text = self
            .extractor
            .extract(input, &document)
            .await
            .map_err(SummarizeError::Extraction)?;
        let extracted = ExtractedText::new(text);

        if extracted.is_blank() {
            tracing::warn!(document_id = %document.id, "No text extracted from document");
        }
        tracing::debug!(
            stage = %RequestStage::Extracted,
            chars = extracted.char_count(),
            preview = %log_preview(extracted.as_str()),
            "Text extracted"
        );

        let max_words = normalize_max_words(request.max_length);
        let prompt = self.prompt_builder.build(extracted.as_str(), max_words);
        tracing::debug!(stage = %RequestStage::PromptBuilt, ?max_words, "Prompt ready");

        let model = self.resolve_model(request.model.as_deref());

        Ok(PreparedSummary {
            document,
            extracted,
            prompt,
            model,
            _scratch: scratch,
        })
    }

    fn resolve_model(&self, requested: Option<&str>) -> String {
        requested
            .map(str::trim)
            .filter(|model| !model.is_empty())
            .unwrap_or(&self.default_model)
            .to_string()
    }
}

fn display_extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

#[derive(Debug, thiserror::Error)]
pub enum SummarizeError {
    #[error("Unsupported file type: {extension}. Supported types: {}", FileType::supported_extensions())]
    UnsupportedFormat { extension: String },
    #[error("scratch storage: {0}")]
    Scratch(#[from] ScratchError),
    #[error("Failed to parse document: {0}")]
    Extraction(ExtractorError),
    #[error("Failed to generate summary: {0}")]
    Inference(InferenceError),
}

impl SummarizeError {
    /// The step that raised the error.
    pub fn stage(&self) -> RequestStage {
        match self {
            SummarizeError::UnsupportedFormat { .. } => RequestStage::TypeValidated,
            SummarizeError::Scratch(_) | SummarizeError::Extraction(_) => RequestStage::Extracted,
            SummarizeError::Inference(_) => RequestStage::Inferred,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SummarizeError::UnsupportedFormat { .. } => "unsupported_format",
            SummarizeError::Scratch(_) => "storage_error",
            SummarizeError::Extraction(ExtractorError::UnsupportedFormat(_)) => "unsupported_format",
            SummarizeError::Extraction(_) => "extraction_error",
            SummarizeError::Inference(e) => e.kind(),
        }
    }
}
