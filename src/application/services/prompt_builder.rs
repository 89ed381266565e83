use crate::domain::SummaryPrompt;

use super::token_counter::estimate_tokens;

pub const DEFAULT_CONTEXT_BUDGET_CHARS: usize = 8000;

/// Composes the summarization prompt, cutting the document text down to the
/// context budget first.
///
/// The budget applies to the embedded document text only; the instruction
/// wrapper around it is a small fixed overhead. Characters are a stand-in for
/// tokens here, so a prompt right at the budget can still overflow the
/// model's window.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    context_budget_chars: usize,
}

impl PromptBuilder {
    pub fn new(context_budget_chars: usize) -> Self {
        Self {
            context_budget_chars,
        }
    }

    pub fn context_budget_chars(&self) -> usize {
        self.context_budget_chars
    }

    pub fn build(&self, text: &str, max_summary_words: Option<u32>) -> SummaryPrompt {
        let embedded = truncate_chars(text, self.context_budget_chars);
        let truncated = embedded.len() < text.len();
        let embedded_chars = embedded.chars().count();

        if truncated {
            tracing::warn!(
                original_chars = text.chars().count(),
                budget_chars = self.context_budget_chars,
                "Document text truncated to fit the context budget"
            );
        }

        let length_clause = max_summary_words
            .map(|words| format!(" in no more than {words} words"))
            .unwrap_or_default();

        let prompt = format!(
            "Please provide a concise summary of the following document{length_clause}.\n\n\
             Document:\n{embedded}\n\n\
             Summary:"
        );
        let estimated_tokens = estimate_tokens(&prompt);

        tracing::debug!(
            embedded_chars,
            truncated,
            estimated_tokens,
            "Summary prompt built"
        );

        SummaryPrompt {
            text: prompt,
            embedded_chars,
            truncated,
            estimated_tokens,
        }
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_CONTEXT_BUDGET_CHARS)
    }
}

/// First `max_chars` characters of `text`. Never splits a character.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// `None`, zero and negative lengths all mean "no limit".
pub fn normalize_max_words(max_length: Option<i64>) -> Option<u32> {
    max_length
        .filter(|words| *words > 0)
        .map(|words| u32::try_from(words).unwrap_or(u32::MAX))
}
