use std::env;

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DictionaryConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Base dataset; the bundled sample is used when unset
    #[serde(default)]
    pub path: Option<String>,
    /// Merged after the base dataset, in order
    #[serde(default)]
    pub additional_paths: Vec<String>,
}

impl DictionaryConfig {
    pub fn new() -> Self {
        let path = env::var("YUEDU_DICT_PATH").ok().filter(|p| !p.is_empty());

        let additional_paths = env::var("YUEDU_EXTRA_DICTS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            enabled: default_enabled(),
            path,
            additional_paths,
        }
    }
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            path: None,
            additional_paths: vec![],
        }
    }
}
