use std::collections::HashMap;

use serde::Deserialize;
use yuedu_core::dictionary::{Dictionary, DictionaryMetadata, LoadError};

use crate::gloss::parse_senses;
use crate::model::{DictionaryEntry, Reading};
use crate::pinyin::Syllable;

/// One dataset record before sense parsing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawRecord {
    pub traditional: String,
    pub simplified: String,
    /// Space-delimited numbered-tone syllables
    pub pinyin: String,
    /// Slash-delimited senses
    pub senses: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("missing {0}")]
    MissingField(&'static str),
    #[error("no usable sense")]
    NoSenses,
}

impl RawRecord {
    /// Parse one CC-CEDICT line: `TRAD SIMP [pin1 yin1] /sense/sense/`
    pub fn from_cedict_line(line: &str) -> Result<Self, RecordError> {
        let line = line.trim();

        let (traditional, rest) = line
            .split_once(' ')
            .ok_or(RecordError::MissingField("simplified"))?;
        let (simplified, rest) = rest
            .trim_start()
            .split_once(' ')
            .ok_or(RecordError::MissingField("pinyin"))?;

        let rest = rest
            .trim_start()
            .strip_prefix('[')
            .ok_or(RecordError::MissingField("pinyin"))?;
        let (pinyin, rest) = rest
            .split_once(']')
            .ok_or(RecordError::MissingField("pinyin"))?;

        let senses = rest
            .trim_start()
            .strip_prefix('/')
            .ok_or(RecordError::MissingField("senses"))?;

        if traditional.is_empty() || simplified.is_empty() {
            return Err(RecordError::MissingField("headword"));
        }

        Ok(Self {
            traditional: traditional.to_string(),
            simplified: simplified.to_string(),
            pinyin: pinyin.trim().to_string(),
            senses: senses.to_string(),
        })
    }

    /// Parse the senses into a reading; a reading without senses is rejected
    pub fn into_reading(self) -> Result<Reading, RecordError> {
        let senses = parse_senses(&self.senses);
        if senses.is_empty() {
            return Err(RecordError::NoSenses);
        }

        Ok(Reading {
            romanization: Syllable::parse_reading(&self.pinyin),
            traditional: self.traditional,
            simplified: self.simplified,
            senses,
        })
    }
}

/// Counters from one dataset load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub records: usize,
    pub loaded: usize,
    pub skipped: usize,
}

/// In-memory CC-CEDICT dictionary.
///
/// Read-only once built; lookups need no synchronization.
#[derive(Debug, Clone, Default)]
pub struct Cedict {
    readings: Vec<Reading>,
    /// Both written forms -> reading indices, ascending
    index: HashMap<String, Vec<usize>>,
    max_word_length: usize,
    stats: LoadStats,
}

impl Cedict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from CC-CEDICT text. Comments and blank lines are ignored,
    /// malformed lines are skipped.
    pub fn from_cedict_text(text: &str) -> Self {
        let mut dict = Self::new();

        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            dict.stats.records += 1;

            match RawRecord::from_cedict_line(line).and_then(RawRecord::into_reading) {
                Ok(reading) => dict.insert(reading),
                Err(e) => {
                    tracing::debug!("Skipping line {}: {}", line_no + 1, e);
                    dict.stats.skipped += 1;
                }
            }
        }

        if dict.stats.skipped > 0 {
            tracing::warn!("Skipped {} malformed dictionary records", dict.stats.skipped);
        }
        dict
    }

    /// Build from a JSON array of `{traditional, simplified, pinyin, senses}`.
    /// Records that fail to deserialize are skipped.
    pub fn from_json(json_str: &str) -> Result<Self, LoadError> {
        let records: Vec<serde_json::Value> = serde_json::from_str(json_str)?;
        let mut dict = Self::new();

        for (idx, value) in records.into_iter().enumerate() {
            dict.stats.records += 1;

            let reading = serde_json::from_value::<RawRecord>(value)
                .map_err(|e| e.to_string())
                .and_then(|r| r.into_reading().map_err(|e| e.to_string()));

            match reading {
                Ok(reading) => dict.insert(reading),
                Err(e) => {
                    tracing::debug!("Skipping record {}: {}", idx, e);
                    dict.stats.skipped += 1;
                }
            }
        }

        if dict.stats.skipped > 0 {
            tracing::warn!("Skipped {} malformed dictionary records", dict.stats.skipped);
        }
        Ok(dict)
    }

    fn insert(&mut self, reading: Reading) {
        let idx = self.readings.len();

        for form in [&reading.traditional, &reading.simplified] {
            let slots = self.index.entry(form.clone()).or_default();
            if slots.last() != Some(&idx) {
                slots.push(idx);
            }
            self.max_word_length = self.max_word_length.max(form.chars().count());
        }

        self.readings.push(reading);
        self.stats.loaded += 1;
    }

    /// Append another dictionary's readings after this one's
    pub fn merge(mut self, other: Cedict) -> Self {
        self.stats.records += other.stats.records;
        self.stats.skipped += other.stats.skipped;

        for reading in other.readings {
            self.insert(reading);
        }

        self
    }

    /// Number of distinct written forms
    pub fn entry_count(&self) -> usize {
        self.index.len()
    }

    pub fn reading_count(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn stats(&self) -> LoadStats {
        self.stats
    }

    /// Readings whose traditional or simplified form is `word`
    pub fn readings_for(&self, word: &str) -> impl Iterator<Item = &Reading> {
        self.index
            .get(word)
            .into_iter()
            .flatten()
            .filter_map(|&idx| self.readings.get(idx))
    }
}

impl Dictionary for Cedict {
    type Entry = DictionaryEntry;

    fn lookup(&self, word: &str) -> Option<DictionaryEntry> {
        let readings: Vec<Reading> = self.readings_for(word).cloned().collect();
        if readings.is_empty() {
            return None;
        }

        Some(DictionaryEntry {
            headword: word.to_string(),
            readings,
        })
    }

    fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    fn metadata(&self) -> DictionaryMetadata {
        DictionaryMetadata {
            name: "CC-CEDICT".to_string(),
            version: "1.0".to_string(),
            language: "zh".to_string(),
            entry_count: self.entry_count(),
            reading_count: self.reading_count(),
            max_word_length: self.max_word_length,
        }
    }
}
