use std::path::Path;

use yuedu_config::dictionary::DictionaryConfig;
use yuedu_core::dictionary::{DictionaryLoader, LoadError};

use crate::cedict::Cedict;

const EMBEDDED: &str = include_str!("../data/cedict_sample.u8");

pub struct CedictLoader;

impl CedictLoader {
    /// Load embedded dictionary data
    pub fn load_embedded() -> Result<Cedict, LoadError> {
        tracing::info!("Loading embedded CC-CEDICT sample...");
        let dict = Cedict::from_cedict_text(EMBEDDED);
        ensure_not_empty(dict, "embedded sample")
    }

    /// Merge two dictionaries (additional readings follow the base ones)
    pub fn merge(base: Cedict, additional: Cedict) -> Cedict {
        base.merge(additional)
    }

    /// Base dataset from config (or the embedded sample), then every
    /// additional dataset that loads. Only a base failure is fatal.
    pub fn load(config: &DictionaryConfig) -> Result<Cedict, LoadError> {
        let mut dict = match &config.path {
            Some(path) => CedictLoader.load_from_file(Path::new(path))?,
            None => Self::load_embedded()?,
        };

        for path in &config.additional_paths {
            match CedictLoader.load_from_file(Path::new(path)) {
                Ok(additional) => {
                    tracing::info!("Merging additional dictionary from: {}", path);
                    dict = Self::merge(dict, additional);
                }
                Err(e) => {
                    tracing::warn!("Failed to load dictionary from {}: {}", path, e);
                }
            }
        }

        Ok(dict)
    }
}

fn ensure_not_empty(dict: Cedict, source: &str) -> Result<Cedict, LoadError> {
    if dict.is_empty() {
        return Err(LoadError::Empty(source.to_string()));
    }
    let stats = dict.stats();
    tracing::info!(
        "Loaded {} readings ({} skipped) for {} headwords from {}",
        stats.loaded,
        stats.skipped,
        dict.entry_count(),
        source
    );
    Ok(dict)
}

impl DictionaryLoader for CedictLoader {
    type Output = Cedict;

    /// `.json` is a record array, anything else is read as CC-CEDICT text
    fn load_from_file(&self, path: &Path) -> Result<Cedict, LoadError> {
        tracing::info!("Loading CC-CEDICT from file: {}", path.display());

        if !path.exists() {
            return Err(LoadError::FileNotFound(path.display().to_string()));
        }

        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        if !self.supported_formats().contains(&extension) {
            tracing::warn!(
                "Unrecognised extension '{}' for {}, reading as CC-CEDICT text",
                extension,
                path.display()
            );
        }

        let content = std::fs::read_to_string(path)?;
        let dict = if extension == "json" {
            Cedict::from_json(&content)?
        } else {
            Cedict::from_cedict_text(&content)
        };

        ensure_not_empty(dict, &path.display().to_string())
    }

    fn supported_formats(&self) -> Vec<String> {
        vec!["u8".to_string(), "txt".to_string(), "json".to_string()]
    }
}
