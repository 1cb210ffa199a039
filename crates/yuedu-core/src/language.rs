use serde::{Deserialize, Serialize};

/// Text processing and lookup interface for language implementations
pub trait LanguageProcessor: Send + Sync {
    /// Result of a headword lookup
    type Entry;

    /// Language identifier (ISO 639-1 code: "ja", "zh", "ko", etc.)
    fn language_code(&self) -> &str;

    /// Normalize text (Unicode normalization, whitespace, etc.)
    fn normalize(&self, text: &str) -> String;

    /// Break text into word tokens whose offsets point into `text`
    fn tokenize(&self, text: &str) -> Vec<Token>;

    /// Look up a word in the dictionary
    fn lookup(&self, word: &str) -> Option<Self::Entry>;
}

/// One segmented word.
///
/// `start..end` is a half-open range of character (not byte) offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn new(text: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Same token shifted right by `offset` characters
    pub fn shifted(mut self, offset: usize) -> Self {
        self.start += offset;
        self.end += offset;
        self
    }
}
