use precis::application::ports::{ExtractionInput, ExtractorError, TextExtractor};
use precis::domain::{FileType, UploadedDocument};
use precis::infrastructure::text_processing::PdfAdapter;

use crate::fixtures::pdf_with_pages;

fn pdf_document(data: &[u8]) -> UploadedDocument {
    UploadedDocument::new("sample.pdf".to_string(), FileType::Pdf, data.len() as u64)
}

#[tokio::test]
async fn given_single_page_pdf_when_extracting_then_returns_page_text() {
    let adapter = PdfAdapter::new();
    let pdf = pdf_with_pages(&["Hello World"]);

    let text = adapter
        .extract(ExtractionInput::in_memory(&pdf), &pdf_document(&pdf))
        .await
        .unwrap();

    assert!(text.contains("Hello World"));
}

#[tokio::test]
async fn given_multi_page_pdf_when_extracting_then_pages_are_in_order_and_separated() {
    let adapter = PdfAdapter::new();
    let pdf = pdf_with_pages(&["First page", "Second page"]);

    let text = adapter
        .extract(ExtractionInput::in_memory(&pdf), &pdf_document(&pdf))
        .await
        .unwrap();

    let first = text.find("First page").unwrap();
    let second = text.find("Second page").unwrap();
    assert!(first < second);
    assert!(text[first..second].contains("\n\n"));
}

#[tokio::test]
async fn given_pdf_without_pages_when_extracting_then_returns_extraction_failed() {
    let adapter = PdfAdapter::new();
    let pdf = pdf_with_pages(&[]);

    let result = adapter
        .extract(ExtractionInput::in_memory(&pdf), &pdf_document(&pdf))
        .await;

    assert!(matches!(result, Err(ExtractorError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_corrupt_bytes_when_extracting_pdf_then_returns_extraction_failed() {
    let adapter = PdfAdapter::new();
    let garbage = b"not a pdf at all";

    let result = adapter
        .extract(ExtractionInput::in_memory(garbage), &pdf_document(garbage))
        .await;

    assert!(matches!(result, Err(ExtractorError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_non_pdf_document_when_extracting_then_returns_unsupported() {
    let adapter = PdfAdapter::new();
    let document = UploadedDocument::new("notes.docx".to_string(), FileType::Docx, 4);

    let result = adapter
        .extract(ExtractionInput::in_memory(b"data"), &document)
        .await;

    assert!(matches!(result, Err(ExtractorError::UnsupportedFormat(_))));
}
