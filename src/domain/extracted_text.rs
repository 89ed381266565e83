/// Plain text pulled out of an upload. Empty text is a valid value and flows
/// on to the prompt builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    text: String,
    char_count: usize,
}

impl ExtractedText {
    pub fn new(text: String) -> Self {
        let char_count = text.chars().count();
        Self { text, char_count }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn char_count(&self) -> usize {
        self.char_count
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
