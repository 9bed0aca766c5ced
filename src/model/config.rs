use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration from config.toml and STASH_* environment variables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage home: one sub-directory per folder, plus the index file
    pub home: PathBuf,
    /// Index file name, relative to `home`
    pub file: String,
    /// Language given to snippets created without an extension
    pub default_language: String,
    /// `#RRGGBB` overrides keyed by theme slot (see `tui::theme`)
    pub colors: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            home: default_home(),
            file: "snippets.json".to_string(),
            default_language: "go".to_string(),
            colors: HashMap::new(),
        }
    }
}

impl Config {
    /// Full path of the index file
    pub fn index_path(&self) -> PathBuf {
        self.home.join(&self.file)
    }
}

/// `$XDG_DATA_HOME/stash`, falling back to `~/.local/share/stash`
pub fn default_home() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| user_home().join(".local").join("share"))
        .join("stash")
}

/// Get the user's home directory
pub fn user_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}
