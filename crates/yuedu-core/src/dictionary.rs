use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

/// Dictionary lookup operations
pub trait Dictionary: Send + Sync {
    /// Parsed result handed back to callers on a hit
    type Entry: Send;

    /// Exact-match lookup against every written form the dictionary indexes.
    /// A miss is `None`, never an error.
    fn lookup(&self, word: &str) -> Option<Self::Entry>;

    /// Membership test, true iff `lookup(word)` would be `Some`
    fn contains(&self, word: &str) -> bool {
        self.lookup(word).is_some()
    }

    /// Get dictionary metadata
    fn metadata(&self) -> DictionaryMetadata;
}

impl<D: Dictionary + ?Sized> Dictionary for Arc<D> {
    type Entry = D::Entry;

    fn lookup(&self, word: &str) -> Option<Self::Entry> {
        (**self).lookup(word)
    }

    fn contains(&self, word: &str) -> bool {
        (**self).contains(word)
    }

    fn metadata(&self) -> DictionaryMetadata {
        (**self).metadata()
    }
}

impl<D: Dictionary + ?Sized> Dictionary for &D {
    type Entry = D::Entry;

    fn lookup(&self, word: &str) -> Option<Self::Entry> {
        (**self).lookup(word)
    }

    fn contains(&self, word: &str) -> bool {
        (**self).contains(word)
    }

    fn metadata(&self) -> DictionaryMetadata {
        (**self).metadata()
    }
}

/// Awaitable view of a dictionary, for backends that do I/O per query.
///
/// Every in-memory [`Dictionary`] gets this for free; a disk-backed store
/// implements it directly and serializes access to its handle internally.
#[async_trait]
pub trait AsyncDictionary: Send + Sync {
    async fn contains_async(&self, word: &str) -> bool;
}

#[async_trait]
impl<D: Dictionary + ?Sized> AsyncDictionary for D {
    async fn contains_async(&self, word: &str) -> bool {
        self.contains(word)
    }
}

/// Load dictionaries from files or embedded data
pub trait DictionaryLoader {
    type Output: Dictionary;

    /// Load dictionary from file path
    fn load_from_file(&self, path: &Path) -> Result<Self::Output, LoadError>;

    /// Supported file formats
    fn supported_formats(&self) -> Vec<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryMetadata {
    pub name: String,
    pub version: String,
    pub language: String,
    pub entry_count: usize,
    pub reading_count: usize,
    /// Longest headword, in characters
    pub max_word_length: usize,
}

/// Failures that leave the dictionary unusable.
///
/// Looking up an unknown word is not one of these.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Dataset {0} contains no usable records")]
    Empty(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
