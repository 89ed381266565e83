#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryPrompt {
    pub text: String,
    /// Characters of source text embedded after truncation.
    pub embedded_chars: usize,
    pub truncated: bool,
    /// cl100k estimate; the backend tokenizer may count differently.
    pub estimated_tokens: usize,
}
