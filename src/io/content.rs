use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::model::snippet::Snippet;

/// Absolute location of a snippet's backing file
pub fn snippet_file(home: &Path, snippet: &Snippet) -> PathBuf {
    home.join(snippet.path())
}

/// Read a snippet's body. Invalid UTF-8 is replaced rather than rejected so
/// binary files still preview.
pub fn read_content(home: &Path, snippet: &Snippet) -> io::Result<String> {
    let bytes = fs::read(snippet_file(home, snippet))?;
    Ok(String::from_utf8(bytes)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned()))
}

/// Single-entry cache for the snippet currently on screen
#[derive(Debug, Default)]
pub struct ContentCache {
    key: Option<PathBuf>,
    text: String,
}

impl ContentCache {
    /// Return the body for `snippet`, reading from disk only when the
    /// displayed snippet changed. Read errors are rendered as the body.
    pub fn get(&mut self, home: &Path, snippet: &Snippet) -> &str {
        let key = snippet.path();
        if self.key.as_ref() != Some(&key) {
            self.text = match read_content(home, snippet) {
                Ok(text) => text,
                Err(e) => format!("could not read {}: {}", key.display(), e),
            };
            self.key = Some(key);
        }
        &self.text
    }

    /// Drop the cached body so the next `get` rereads it
    pub fn invalidate(&mut self) {
        self.key = None;
        self.text.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn reads_lazily_and_caches() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("Notes")).unwrap();
        fs::write(dir.path().join("Notes/todo.md"), "- milk").unwrap();
        let snippet = Snippet::discovered("Notes", "todo.md");

        let mut cache = ContentCache::default();
        assert_eq!(cache.get(dir.path(), &snippet), "- milk");

        // cached: disk changes are not seen until invalidated
        fs::write(dir.path().join("Notes/todo.md"), "- eggs").unwrap();
        assert_eq!(cache.get(dir.path(), &snippet), "- milk");
        cache.invalidate();
        assert_eq!(cache.get(dir.path(), &snippet), "- eggs");
    }

    #[test]
    fn missing_file_renders_error() {
        let dir = TempDir::new().unwrap();
        let snippet = Snippet::discovered("Notes", "gone.md");
        let mut cache = ContentCache::default();
        assert!(cache.get(dir.path(), &snippet).starts_with("could not read"));
    }
}
