use std::path::Path;

use async_trait::async_trait;

use crate::domain::{FileType, UploadedDocument};

/// What an extractor gets to read from: the upload bytes, plus the path of
/// a scratch copy when the extractor asked for one.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionInput<'a> {
    pub data: &'a [u8],
    pub scratch_path: Option<&'a Path>,
}

impl<'a> ExtractionInput<'a> {
    pub fn in_memory(data: &'a [u8]) -> Self {
        Self {
            data,
            scratch_path: None,
        }
    }

    pub fn with_scratch_file(data: &'a [u8], scratch_path: &'a Path) -> Self {
        Self {
            data,
            scratch_path: Some(scratch_path),
        }
    }
}

#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Whether this extractor parses from a file on disk rather than from
    /// the in-memory buffer.
    fn needs_scratch_file(&self, _file_type: FileType) -> bool {
        false
    }

    async fn extract(
        &self,
        input: ExtractionInput<'_>,
        document: &UploadedDocument,
    ) -> Result<String, ExtractorError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractorError {
    #[error("unsupported file type: {0}")]
    UnsupportedFormat(String),
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("extractor requires a scratch file but none was provided")]
    ScratchFileRequired,
}
