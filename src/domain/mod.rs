mod document;
mod document_id;
mod extracted_text;
mod request_stage;
mod summary;
mod summary_prompt;

pub use document::{FileType, UploadedDocument};
pub use document_id::DocumentId;
pub use extracted_text::ExtractedText;
pub use request_stage::RequestStage;
pub use summary::{InferenceResult, SummaryMetadata, SummaryResponse};
pub use summary_prompt::SummaryPrompt;
