use serde::Serialize;

use crate::language::Token;

/// Identifies one request coming from the reading surface
pub type RequestId = u64;

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A raw text block to split into runs and segment
    TextInput { id: RequestId, text: String },
    /// Exact headword lookup (definition panel, cross-reference tap)
    Lookup { id: RequestId, word: String },
    ShowSegments(SegmentResponse),
    ShowEntry(LookupResponse),
    /// The dictionary did not answer in time or is disabled
    DictionaryUnavailable { id: RequestId, reason: String },
    Shutdown,
}

#[derive(Debug, Clone, Serialize)]
pub struct SegmentResponse {
    pub id: RequestId,
    pub tokens: Vec<Token>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LookupResponse {
    pub id: RequestId,
    pub word: String,
    /// Parsed entry as JSON, `None` when the word is not in the dictionary
    pub entry: Option<serde_json::Value>,
    /// First-match definition for compact display
    pub summary: Option<DisplayResult>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DisplayResult {
    pub term: String,
    pub reading: String,
    pub definition: String,
}
