mod blocking;
mod composite_extractor;
mod doc_adapter;
mod docx_adapter;
mod extractor_factory;
mod pdf_adapter;
mod text_sanitizer;

pub use blocking::DEFAULT_EXTRACTION_TIMEOUT;
pub use composite_extractor::CompositeExtractor;
pub use doc_adapter::DocAdapter;
pub use docx_adapter::DocxAdapter;
pub use extractor_factory::ExtractorFactory;
pub use pdf_adapter::PdfAdapter;
pub use text_sanitizer::{join_blocks, sanitize_extracted_text};
