mod prompt_builder;
mod summarization_service;
mod token_counter;

pub use prompt_builder::{
    DEFAULT_CONTEXT_BUDGET_CHARS, PromptBuilder, normalize_max_words, truncate_chars,
};
pub use summarization_service::{
    SummarizationService, SummarizeError, SummarizeRequest, SummaryStream,
};
pub use token_counter::estimate_tokens;
