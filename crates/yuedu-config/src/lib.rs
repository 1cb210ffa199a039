use std::env;

use serde::{Deserialize, Serialize};

use self::dictionary::DictionaryConfig;
use self::segmentation::SegmentationConfig;

pub mod dictionary;
pub mod segmentation;

fn default_lookup_timeout_ms() -> u64 {
    2000
}

fn default_channel_capacity() -> usize {
    64
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub dictionary: DictionaryConfig,
    pub segmentation: SegmentationConfig,

    /// Budget for one segmentation or lookup request before it is
    /// reported as "dictionary unavailable"
    #[serde(default = "default_lookup_timeout_ms")]
    pub lookup_timeout_ms: u64,
    /// Bound of the app event channels
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Config {
    pub fn new() -> Self {
        let lookup_timeout_ms = env::var("YUEDU_LOOKUP_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_lookup_timeout_ms);

        let channel_capacity = env::var("YUEDU_CHANNEL_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_channel_capacity);

        Config {
            dictionary: DictionaryConfig::new(),
            segmentation: SegmentationConfig::new(),

            lookup_timeout_ms,
            channel_capacity,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary: DictionaryConfig::default(),
            segmentation: SegmentationConfig::default(),
            lookup_timeout_ms: default_lookup_timeout_ms(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "segmentation": { "warm_cache": true } }"#).unwrap();
        assert!(config.dictionary.enabled);
        assert!(config.dictionary.path.is_none());
        assert_eq!(config.segmentation.max_word_length, 6);
        assert!(config.segmentation.warm_cache);
        assert_eq!(config.lookup_timeout_ms, 2000);
    }

    #[test]
    fn test_window_never_zero() {
        let seg = SegmentationConfig {
            max_word_length: 0,
            warm_cache: false,
        };
        assert_eq!(seg.window(), 1);
    }
}
