use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{ExtractionInput, ExtractorError, TextExtractor};
use crate::domain::{FileType, UploadedDocument};

use super::blocking::{DEFAULT_EXTRACTION_TIMEOUT, run_blocking};
use super::text_sanitizer::{join_blocks, sanitize_extracted_text};

pub struct PdfAdapter {
    timeout: Duration,
}

impl Default for PdfAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfAdapter {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_EXTRACTION_TIMEOUT,
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn extract_pages(data: &[u8]) -> Result<Vec<String>, ExtractorError> {
        let doc = lopdf::Document::load_mem(data)
            .map_err(|e| ExtractorError::ExtractionFailed(format!("failed to parse PDF: {e}")))?;

        if doc.is_encrypted() && doc.encryption_state.is_none() {
            return Err(ExtractorError::ExtractionFailed(
                "PDF is password protected".to_string(),
            ));
        }

        let page_numbers: Vec<u32> = doc.get_pages().into_keys().collect();
        if page_numbers.is_empty() {
            return Err(ExtractorError::ExtractionFailed(
                "PDF has no pages".to_string(),
            ));
        }

        let mut pages = Vec::with_capacity(page_numbers.len());
        for page_number in page_numbers {
            match doc.extract_text(&[page_number]) {
                Ok(text) => pages.push(sanitize_extracted_text(&text)),
                Err(e) => {
                    tracing::warn!(page_number, error = %e, "Skipping unreadable PDF page");
                }
            }
        }

        Ok(pages)
    }
}

#[async_trait]
impl TextExtractor for PdfAdapter {
    #[tracing::instrument(
        skip(self, input),
        fields(document_id = %document.id, filename = %document.filename)
    )]
    async fn extract(
        &self,
        input: ExtractionInput<'_>,
        document: &UploadedDocument,
    ) -> Result<String, ExtractorError> {
        if document.file_type != FileType::Pdf {
            return Err(ExtractorError::UnsupportedFormat(
                document.file_type.as_mime().to_string(),
            ));
        }

        let data = input.data.to_vec();
        let pages = run_blocking(self.timeout, FileType::Pdf, move || {
            Self::extract_pages(&data)
        })
        .await?;

        tracing::info!(page_count = pages.len(), "PDF text extraction complete");

        Ok(join_blocks(pages))
    }
}
