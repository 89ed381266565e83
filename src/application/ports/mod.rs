mod inference_client;
mod scratch_store;
mod text_extractor;

pub use inference_client::{BackendHealth, InferenceClient, InferenceError, TokenStream};
pub use scratch_store::{ScratchArtifact, ScratchError, ScratchStore};
pub use text_extractor::{ExtractionInput, ExtractorError, TextExtractor};
