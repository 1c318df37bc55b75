use serde::{Deserialize, Serialize};

/// One highlight as stored by the e-reader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightRecord {
    /// Highlighted passage, used verbatim as the search key
    pub snippet_text: String,
    /// Length the reader recorded for the highlight; informational only
    pub declared_length: i64,
    /// Signed ARGB color code
    pub color_code: i32,
}

impl HighlightRecord {
    pub fn new(snippet_text: impl Into<String>, declared_length: i64, color_code: i32) -> Self {
        Self {
            snippet_text: snippet_text.into(),
            declared_length,
            color_code,
        }
    }

    /// First `max_chars` characters of the snippet, for log and report lines
    pub fn preview(&self, max_chars: usize) -> &str {
        match self.snippet_text.char_indices().nth(max_chars) {
            Some((end, _)) => &self.snippet_text[..end],
            None => &self.snippet_text,
        }
    }
}
