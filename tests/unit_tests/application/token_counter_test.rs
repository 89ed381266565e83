use precis::application::services::estimate_tokens;

#[test]
fn given_empty_text_when_estimating_then_zero() {
    assert_eq!(estimate_tokens(""), 0);
}

#[test]
fn given_longer_text_when_estimating_then_counts_more_tokens() {
    let short = estimate_tokens("Summarize this.");
    let long = estimate_tokens(&"Summarize this document carefully. ".repeat(20));

    assert!(short > 0);
    assert!(long > short);
}
