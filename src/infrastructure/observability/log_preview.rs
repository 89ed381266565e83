const PREVIEW_CHARS: usize = 100;

/// Short, single-line rendering of document or prompt text for log fields.
/// Full document text never goes to the logs.
pub fn log_preview(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total = collapsed.chars().count();
    if total <= PREVIEW_CHARS {
        return collapsed;
    }

    let head: String = collapsed.chars().take(PREVIEW_CHARS).collect();
    format!("{head}... ({total} chars total)")
}
