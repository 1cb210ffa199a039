use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use yuedu_config::Config;

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

/// Load a profile file and return its config
pub fn load_profile(path: &Path) -> anyhow::Result<Config> {
    tracing::info!("Loading profile from {}", path.display());
    let file = File::open(path).with_context(|| format!("opening profile {}", path.display()))?;
    let reader = BufReader::new(file);
    let profile: Profile = serde_json::from_reader(reader)
        .with_context(|| format!("parsing profile {}", path.display()))?;
    tracing::info!("Using profile '{}'", profile.name);
    Ok(profile.value)
}

/// Profile file if given, otherwise defaults with environment overrides
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => load_profile(path),
        None => Ok(Config::new()),
    }
}

/// Write `config` as a named profile, refusing to overwrite an existing file
pub fn write_profile(path: &Path, name: &str, config: Config) -> anyhow::Result<()> {
    if path.exists() {
        anyhow::bail!("profile {} already exists", path.display());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let profile = Profile {
        name: name.into(),
        value: config,
    };
    fs::write(path, serde_json::to_string_pretty(&profile)?)?;
    tracing::info!("Created profile '{}' at {}", name, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_round_trip_and_no_overwrite() {
        let path = std::env::temp_dir().join(format!("yuedu-profile-{}.json", std::process::id()));
        fs::remove_file(&path).ok();

        let mut config = Config::default();
        config.segmentation.max_word_length = 4;
        write_profile(&path, "reader", config).unwrap();

        let loaded = load_config(Some(&path)).unwrap();
        assert_eq!(loaded.segmentation.max_word_length, 4);
        assert!(write_profile(&path, "again", Config::default()).is_err());

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_profile_is_error() {
        assert!(load_profile(Path::new("/nonexistent/profile.json")).is_err());
    }
}
