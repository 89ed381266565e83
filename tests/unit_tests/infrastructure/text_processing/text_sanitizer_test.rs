use precis::infrastructure::text_processing::{join_blocks, sanitize_extracted_text};

#[test]
fn given_hyphenated_line_break_when_sanitizing_then_rejoins_word() {
    assert_eq!(sanitize_extracted_text("summari-\nzation works"), "summarization works");
}

#[test]
fn given_runs_of_spaces_and_tabs_when_sanitizing_then_collapses_them() {
    assert_eq!(sanitize_extracted_text("  too   many \t spaces  "), "too many spaces");
}

#[test]
fn given_many_blank_lines_when_sanitizing_then_keeps_one() {
    assert_eq!(
        sanitize_extracted_text("first\n\n\n\n  \nsecond\nthird"),
        "first\n\nsecond\nthird"
    );
}

#[test]
fn given_carriage_returns_when_sanitizing_then_treated_as_newlines() {
    assert_eq!(sanitize_extracted_text("a\r\nb\rc"), "a\nb\nc");
}

#[test]
fn given_compatibility_characters_when_sanitizing_then_normalizes_nfkc() {
    assert_eq!(sanitize_extracted_text("ﬁle"), "file");
}

#[test]
fn given_blocks_with_blanks_when_joining_then_skips_blank_ones() {
    assert_eq!(join_blocks(["one", "  ", "", "two"]), "one\n\ntwo");
    assert_eq!(join_blocks(Vec::<String>::new()), "");
}
