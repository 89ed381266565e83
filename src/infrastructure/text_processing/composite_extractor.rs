use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{ExtractionInput, ExtractorError, TextExtractor};
use crate::domain::{FileType, UploadedDocument};

/// Routes each upload to the extractor registered for its file type.
pub struct CompositeExtractor {
    extractors: HashMap<FileType, Arc<dyn TextExtractor>>,
}

impl CompositeExtractor {
    pub fn new(extractors: Vec<(FileType, Arc<dyn TextExtractor>)>) -> Self {
        Self {
            extractors: extractors.into_iter().collect(),
        }
    }

    fn extractor_for(&self, file_type: FileType) -> Result<&Arc<dyn TextExtractor>, ExtractorError> {
        self.extractors
            .get(&file_type)
            .ok_or_else(|| ExtractorError::UnsupportedFormat(file_type.as_mime().to_string()))
    }
}

#[async_trait]
impl TextExtractor for CompositeExtractor {
    fn needs_scratch_file(&self, file_type: FileType) -> bool {
        self.extractors
            .get(&file_type)
            .is_some_and(|extractor| extractor.needs_scratch_file(file_type))
    }

    async fn extract(
        &self,
        input: ExtractionInput<'_>,
        document: &UploadedDocument,
    ) -> Result<String, ExtractorError> {
        self.extractor_for(document.file_type)?
            .extract(input, document)
            .await
    }
}
