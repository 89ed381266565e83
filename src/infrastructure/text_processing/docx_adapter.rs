use std::io::{Cursor, Read};
use std::time::Duration;

use async_trait::async_trait;
use roxmltree::Node;

use crate::application::ports::{ExtractionInput, ExtractorError, TextExtractor};
use crate::domain::{FileType, UploadedDocument};

use super::blocking::{DEFAULT_EXTRACTION_TIMEOUT, run_blocking};
use super::text_sanitizer::join_blocks;

const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const DOCUMENT_PART: &str = "word/document.xml";

/// Word 2007+ (`.docx`). Reads body paragraphs only; tables, headers and
/// footers are not part of the output.
pub struct DocxAdapter {
    timeout: Duration,
}

impl Default for DocxAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocxAdapter {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_EXTRACTION_TIMEOUT,
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn read_document_part(data: &[u8]) -> Result<String, ExtractorError> {
        let mut archive = zip::ZipArchive::new(Cursor::new(data)).map_err(|e| {
            ExtractorError::ExtractionFailed(format!("not a valid DOCX archive: {e}"))
        })?;

        let mut part = archive.by_name(DOCUMENT_PART).map_err(|e| {
            ExtractorError::ExtractionFailed(format!("missing {DOCUMENT_PART}: {e}"))
        })?;

        let mut xml = String::new();
        part.read_to_string(&mut xml).map_err(|e| {
            ExtractorError::ExtractionFailed(format!("failed to read {DOCUMENT_PART}: {e}"))
        })?;

        Ok(xml)
    }

    fn extract_paragraphs(data: &[u8]) -> Result<Vec<String>, ExtractorError> {
        let xml = Self::read_document_part(data)?;
        let doc = roxmltree::Document::parse(&xml).map_err(|e| {
            ExtractorError::ExtractionFailed(format!("malformed {DOCUMENT_PART}: {e}"))
        })?;

        let Some(body) = doc
            .root_element()
            .children()
            .find(|n| n.has_tag_name((WORDML_NS, "body")))
        else {
            return Ok(Vec::new());
        };

        Ok(body
            .children()
            .filter(|n| n.has_tag_name((WORDML_NS, "p")))
            .map(paragraph_text)
            .collect())
    }
}

fn paragraph_text(paragraph: Node<'_, '_>) -> String {
    let mut text = String::new();

    for run in paragraph
        .descendants()
        .filter(|n| n.has_tag_name((WORDML_NS, "r")))
    {
        for child in run
            .children()
            .filter(|n| n.is_element() && n.tag_name().namespace() == Some(WORDML_NS))
        {
            match child.tag_name().name() {
                "t" => text.push_str(child.text().unwrap_or_default()),
                "tab" => text.push('\t'),
                "br" | "cr" => text.push('\n'),
                _ => {}
            }
        }
    }

    text
}

#[async_trait]
impl TextExtractor for DocxAdapter {
    #[tracing::instrument(
        skip(self, input),
        fields(document_id = %document.id, filename = %document.filename)
    )]
    async fn extract(
        &self,
        input: ExtractionInput<'_>,
        document: &UploadedDocument,
    ) -> Result<String, ExtractorError> {
        if document.file_type != FileType::Docx {
            return Err(ExtractorError::UnsupportedFormat(
                document.file_type.as_mime().to_string(),
            ));
        }

        let data = input.data.to_vec();
        let paragraphs = run_blocking(self.timeout, FileType::Docx, move || {
            Self::extract_paragraphs(&data)
        })
        .await?;

        tracing::info!(
            paragraph_count = paragraphs.len(),
            "DOCX text extraction complete"
        );

        Ok(join_blocks(paragraphs))
    }
}
