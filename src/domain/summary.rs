use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceResult {
    pub summary: String,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryResponse {
    pub filename: String,
    pub file_type: String,
    pub model: String,
    pub original_length: usize,
    pub summary: String,
    pub summary_length: usize,
}

/// Everything about a streamed summary that is known before the first token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryMetadata {
    pub filename: String,
    pub file_type: String,
    pub model: String,
    pub original_length: usize,
}
