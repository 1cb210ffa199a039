use std::path::PathBuf;

use clap::{Parser, Subcommand};
use yuedu_config::Config;

#[derive(Debug, Parser)]
#[command(name = "yuedu", version, about = "Offline Chinese word segmentation and dictionary lookup")]
pub struct Cli {
    /// Profile file (`{"name": ..., "value": {config}}`)
    #[arg(long, global = true)]
    pub profile: Option<PathBuf>,

    /// Dictionary dataset (CC-CEDICT text or JSON), overrides the profile
    #[arg(long, global = true)]
    pub dict: Option<PathBuf>,

    /// Longest candidate word in characters
    #[arg(long, global = true)]
    pub max_word_len: Option<usize>,

    /// Log as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Segment text into dictionary words
    Segment {
        text: String,
        /// Print tokens as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the dictionary entry for an exact headword
    Lookup {
        word: String,
        /// Print the parsed entry as JSON
        #[arg(long)]
        json: bool,
    },
    /// Answer requests from stdin as JSON lines (`?word` looks a word up)
    Serve,
    /// Write the effective configuration as a new profile
    InitProfile {
        path: PathBuf,
        #[arg(long, default_value = "main")]
        name: String,
    },
}

impl Cli {
    /// Command-line flags take precedence over the profile
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(dict) = &self.dict {
            config.dictionary.path = Some(dict.display().to_string());
        }
        if let Some(len) = self.max_word_len {
            config.segmentation.max_word_length = len;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_win() {
        let cli = Cli::parse_from(["yuedu", "--dict", "/tmp/cedict.u8", "--max-word-len", "4", "serve"]);
        let mut config = Config::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.dictionary.path.as_deref(), Some("/tmp/cedict.u8"));
        assert_eq!(config.segmentation.max_word_length, 4);
        assert!(matches!(cli.command, Command::Serve));
    }

    #[test]
    fn test_segment_args() {
        let cli = Cli::parse_from(["yuedu", "segment", "你好", "--json"]);
        match cli.command {
            Command::Segment { text, json } => {
                assert_eq!(text, "你好");
                assert!(json);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
