use std::sync::Arc;

use unicode_normalization::UnicodeNormalization;
use yuedu_config::Config;
use yuedu_config::segmentation::SegmentationConfig;
use yuedu_core::dictionary::{Dictionary, LoadError};
use yuedu_core::language::{LanguageProcessor, Token};
use yuedu_core::preprocess::{chinese_runs, fold_compatibility};
use yuedu_core::types::DisplayResult;

use crate::cedict::Cedict;
use crate::loader::CedictLoader;
use crate::model::DictionaryEntry;
use crate::segmenter::{MembershipCache, Segmenter};
use crate::senses::render_sense;

/// Chinese language processor
pub struct ChineseProcessor {
    dictionary: Arc<Cedict>,
    segmenter: Segmenter,
}

impl ChineseProcessor {
    pub fn new(dictionary: Cedict, segmentation: &SegmentationConfig) -> Self {
        Self {
            dictionary: Arc::new(dictionary),
            segmenter: Segmenter::from_config(segmentation),
        }
    }

    /// Load the configured dictionaries. Fails only if the base dataset
    /// cannot be loaded.
    pub fn from_config(config: &Config) -> Result<Self, LoadError> {
        let dictionary = CedictLoader::load(&config.dictionary)?;
        let metadata = dictionary.metadata();
        tracing::info!(
            "{} ready: {} headwords, {} readings, longest word {} chars",
            metadata.name,
            metadata.entry_count,
            metadata.reading_count,
            metadata.max_word_length
        );
        Ok(Self::new(dictionary, &config.segmentation))
    }

    pub fn dictionary(&self) -> &Arc<Cedict> {
        &self.dictionary
    }

    pub fn segmenter(&self) -> &Segmenter {
        &self.segmenter
    }

    /// [`LanguageProcessor::tokenize`] with a caller-owned membership cache.
    ///
    /// Token text is the folded form (see [`fold_compatibility`]); offsets
    /// are character offsets into `text` itself.
    pub fn tokenize_with_cache(&self, text: &str, cache: &mut MembershipCache) -> Vec<Token> {
        let folded = fold_compatibility(text);
        chinese_runs(&folded)
            .into_iter()
            .flat_map(|run| {
                self.segmenter
                    .segment_with_cache(self.dictionary.as_ref(), run.text, cache)
                    .into_iter()
                    .map(move |token| token.shifted(run.start))
            })
            .collect()
    }
}

impl LanguageProcessor for ChineseProcessor {
    type Entry = DictionaryEntry;

    fn language_code(&self) -> &str {
        "zh"
    }

    fn normalize(&self, text: &str) -> String {
        text.nfkc()
            .collect::<String>()
            .chars()
            .filter(|c| !c.is_whitespace() || *c == ' ')
            .collect()
    }

    /// Segments every Han run of `text`; offsets index into `text`
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut cache = MembershipCache::new();
        self.tokenize_with_cache(text, &mut cache)
    }

    fn lookup(&self, word: &str) -> Option<DictionaryEntry> {
        self.dictionary.lookup(&self.normalize(word.trim()))
    }
}

/// Compact one-line view of an entry using the first matching sense
pub fn summarize(entry: &DictionaryEntry) -> DisplayResult {
    let reading = entry
        .readings
        .iter()
        .map(|r| r.accented_romanization())
        .collect::<Vec<_>>()
        .join(", ");

    DisplayResult {
        term: entry.headword.clone(),
        reading,
        definition: entry
            .primary_definition()
            .map(render_sense)
            .unwrap_or_default(),
    }
}
