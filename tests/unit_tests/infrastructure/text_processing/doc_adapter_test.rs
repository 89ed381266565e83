use precis::application::ports::{ExtractionInput, ExtractorError, TextExtractor};
use precis::domain::{FileType, UploadedDocument};
use precis::infrastructure::text_processing::DocAdapter;

use crate::fixtures::{DocOptions, write_doc};

fn doc_document() -> UploadedDocument {
    UploadedDocument::new("legacy.doc".to_string(), FileType::Doc, 0)
}

async fn extract_doc(text: &str, options: DocOptions) -> Result<String, ExtractorError> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.doc");
    write_doc(&path, text, options);

    DocAdapter::new()
        .extract(ExtractionInput::with_scratch_file(&[], &path), &doc_document())
        .await
}

#[test]
fn given_doc_adapter_when_asked_then_needs_scratch_file_only_for_doc() {
    let adapter = DocAdapter::new();

    assert!(adapter.needs_scratch_file(FileType::Doc));
    assert!(!adapter.needs_scratch_file(FileType::Pdf));
}

#[tokio::test]
async fn given_compressed_text_when_extracting_then_returns_paragraphs() {
    let text = extract_doc("First paragraph\rSecond paragraph\r", DocOptions::default())
        .await
        .unwrap();

    assert_eq!(text, "First paragraph\n\nSecond paragraph");
}

#[tokio::test]
async fn given_utf16_text_when_extracting_then_decodes_unicode() {
    let options = DocOptions {
        compressed: false,
        ..DocOptions::default()
    };

    let text = extract_doc("Grüße aus Köln\r", options).await.unwrap();

    assert_eq!(text, "Grüße aus Köln");
}

#[tokio::test]
async fn given_field_codes_when_extracting_then_keeps_only_field_result() {
    let raw = "See \u{13} HYPERLINK \"http://example.com\" \u{14}the link\u{15} here\r";

    let text = extract_doc(raw, DocOptions::default()).await.unwrap();

    assert_eq!(text, "See the link here");
}

#[tokio::test]
async fn given_word_control_marks_when_extracting_then_maps_them() {
    let raw = "line one\u{0B}line two\rcell\u{07}x\u{1E}y\u{01}\r\r";

    let text = extract_doc(raw, DocOptions::default()).await.unwrap();

    assert_eq!(text, "line one\nline two\n\ncell\tx-y");
}

#[tokio::test]
async fn given_encrypted_document_when_extracting_then_returns_extraction_failed() {
    let options = DocOptions {
        encrypted: true,
        ..DocOptions::default()
    };

    let result = extract_doc("secret\r", options).await;

    assert!(matches!(result, Err(ExtractorError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_missing_piece_table_when_extracting_then_returns_extraction_failed() {
    let options = DocOptions {
        with_piece_table: false,
        ..DocOptions::default()
    };

    let result = extract_doc("text\r", options).await;

    assert!(matches!(result, Err(ExtractorError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_non_ole_file_when_extracting_then_returns_extraction_failed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fake.doc");
    std::fs::write(&path, b"this is not a compound file").unwrap();

    let result = DocAdapter::new()
        .extract(ExtractionInput::with_scratch_file(&[], &path), &doc_document())
        .await;

    assert!(matches!(result, Err(ExtractorError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_no_scratch_file_when_extracting_then_reports_scratch_required() {
    let result = DocAdapter::new()
        .extract(ExtractionInput::in_memory(b"bytes"), &doc_document())
        .await;

    assert!(matches!(result, Err(ExtractorError::ScratchFileRequired)));
}
