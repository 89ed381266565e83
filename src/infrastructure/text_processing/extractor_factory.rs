use std::sync::Arc;

use crate::domain::FileType;
use crate::presentation::config::ExtractionSettings;

use super::composite_extractor::CompositeExtractor;
use super::doc_adapter::DocAdapter;
use super::docx_adapter::DocxAdapter;
use super::pdf_adapter::PdfAdapter;

pub struct ExtractorFactory;

impl ExtractorFactory {
    /// One extractor per supported file type, sharing the configured
    /// extraction timeout.
    pub fn create(settings: &ExtractionSettings) -> CompositeExtractor {
        let timeout = settings.timeout();
        tracing::info!(timeout_secs = timeout.as_secs(), "Registering document extractors");

        CompositeExtractor::new(vec![
            (FileType::Pdf, Arc::new(PdfAdapter::with_timeout(timeout))),
            (FileType::Docx, Arc::new(DocxAdapter::with_timeout(timeout))),
            (FileType::Doc, Arc::new(DocAdapter::with_timeout(timeout))),
        ])
    }
}
