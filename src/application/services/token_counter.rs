use std::sync::LazyLock;

use tiktoken_rs::CoreBPE;

static TOKENIZER: LazyLock<Option<CoreBPE>> = LazyLock::new(|| {
    tiktoken_rs::cl100k_base()
        .inspect_err(|e| tracing::warn!(error = %e, "cl100k tokenizer unavailable"))
        .ok()
});

const CHARS_PER_TOKEN: usize = 4;

/// Approximate token count of `text`. Local models tokenize differently, so
/// this is only a guide for logging how close a prompt is to the context
/// window.
pub fn estimate_tokens(text: &str) -> usize {
    match TOKENIZER.as_ref() {
        Some(bpe) => bpe.encode_with_special_tokens(text).len(),
        None => text.chars().count().div_ceil(CHARS_PER_TOKEN),
    }
}
