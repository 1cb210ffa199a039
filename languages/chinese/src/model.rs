use serde::Serialize;

use crate::pinyin::Syllable;

/// Everything the dictionary knows about one written form.
///
/// `headword` is the queried form; readings matched on either their
/// traditional or simplified spelling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DictionaryEntry {
    pub headword: String,
    pub readings: Vec<Reading>,
}

/// What `Cedict::lookup` hands back
pub type DictionaryResult = DictionaryEntry;

impl DictionaryEntry {
    /// First non-classifier sense, readings taken in dataset order
    pub fn primary_definition(&self) -> Option<&Sense> {
        self.readings
            .iter()
            .flat_map(|r| r.senses.iter())
            .find(|s| !s.is_classifier)
    }
}

/// One pronunciation of a written form with its meanings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub traditional: String,
    pub simplified: String,
    pub romanization: Vec<Syllable>,
    pub senses: Vec<Sense>,
}

impl Reading {
    /// `nǐ hǎo` style display of the whole reading
    pub fn accented_romanization(&self) -> String {
        self.romanization
            .iter()
            .map(Syllable::accented)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Matches on either written form
    pub fn is_written(&self, word: &str) -> bool {
        self.traditional == word || self.simplified == word
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sense {
    /// Equivalent phrasings, shown joined
    pub glosses: Vec<Gloss>,
    /// Measure-word annotation rather than a meaning
    pub is_classifier: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Gloss {
    pub fragments: Vec<GlossFragment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum GlossFragment {
    Text(String),
    Romanization(Vec<Syllable>),
    /// Cross-reference to another headword
    Link {
        traditional: String,
        simplified: String,
        romanization: Option<Vec<Syllable>>,
    },
}
