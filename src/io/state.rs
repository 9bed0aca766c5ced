use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Cursor positions remembered between TUI sessions (written to .state.json)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Folder selected when the last session ended
    #[serde(default)]
    pub current_folder: String,
    /// File name of the snippet selected in that folder
    #[serde(default)]
    pub current_snippet: String,
}

fn state_path(home: &Path) -> PathBuf {
    home.join(".state.json")
}

/// Read .state.json from the storage home
pub fn read_session_state(home: &Path) -> Option<SessionState> {
    let content = fs::read_to_string(state_path(home)).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write .state.json to the storage home
pub fn write_session_state(home: &Path, state: &SessionState) -> Result<(), std::io::Error> {
    let content = serde_json::to_string_pretty(state)?;
    fs::write(state_path(home), content)
}
