use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static HYPHENATED_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w)-[ \t]*\n[ \t]*(\w)").unwrap());
static INLINE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\S\n]+").unwrap());
static BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Cleans up text lifted from a PDF page: NFKC normalization, words split
/// across a line break rejoined, horizontal whitespace collapsed, and at
/// most one blank line between paragraphs.
pub fn sanitize_extracted_text(raw: &str) -> String {
    let normalized: String = raw.replace("\r\n", "\n").replace('\r', "\n").nfkc().collect();
    let rejoined = HYPHENATED_BREAK.replace_all(&normalized, "$1$2");

    let lines: Vec<String> = rejoined
        .lines()
        .map(|line| INLINE_WHITESPACE.replace_all(line.trim(), " ").into_owned())
        .collect();

    BLANK_RUN
        .replace_all(lines.join("\n").trim(), "\n\n")
        .into_owned()
}

/// Joins non-blank blocks (pages, paragraphs) with a blank line.
pub fn join_blocks<I, S>(blocks: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    blocks
        .into_iter()
        .filter(|block| !block.as_ref().trim().is_empty())
        .map(|block| block.as_ref().to_string())
        .collect::<Vec<_>>()
        .join("\n\n")
}
