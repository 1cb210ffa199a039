use std::env;

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_WORD_LENGTH: usize = 6;

fn default_max_word_length() -> usize {
    DEFAULT_MAX_WORD_LENGTH
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Longest candidate word tried, in characters
    #[serde(default = "default_max_word_length")]
    pub max_word_length: usize,
    /// Keep the membership cache across runs instead of clearing it per call
    #[serde(default)]
    pub warm_cache: bool,
}

impl SegmentationConfig {
    pub fn new() -> Self {
        let max_word_length = env::var("YUEDU_MAX_WORD_LEN")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_WORD_LENGTH);

        let warm_cache = env::var("YUEDU_WARM_CACHE")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            max_word_length,
            warm_cache,
        }
    }

    /// `max_word_length`, never below one
    pub fn window(&self) -> usize {
        self.max_word_length.max(1)
    }
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            max_word_length: default_max_word_length(),
            warm_cache: false,
        }
    }
}
