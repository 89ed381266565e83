mod doc_adapter_test;
mod pdf_adapter_test;
mod text_sanitizer_test;
