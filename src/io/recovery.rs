use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;

/// Self-documenting header written at the top of a new recovery log.
const FILE_HEADER: &str = "\
<!-- stash recovery log: append-only copies of data that could not be saved
     normally (corrupt indexes, failed index writes).
     If a snippet went missing from the index, look here.
     Safe to delete once you have what you need. -->

---
";

/// Category of a recovery entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryCategory {
    /// Index file that failed to parse, preserved before it gets rebuilt
    Index,
    /// Index contents that could not be written back
    Write,
}

impl fmt::Display for RecoveryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryCategory::Index => write!(f, "index"),
            RecoveryCategory::Write => write!(f, "write"),
        }
    }
}

/// A single entry in the recovery log.
#[derive(Debug, Clone)]
pub struct RecoveryEntry {
    pub timestamp: DateTime<Utc>,
    pub category: RecoveryCategory,
    pub description: String,
    pub fields: Vec<(String, String)>,
    pub body: String,
}

impl RecoveryEntry {
    pub fn new(category: RecoveryCategory, description: &str) -> Self {
        RecoveryEntry {
            timestamp: Utc::now(),
            category,
            description: description.to_string(),
            fields: Vec::new(),
            body: String::new(),
        }
    }

    pub fn field(mut self, key: &str, value: impl fmt::Display) -> Self {
        self.fields.push((key.to_string(), value.to_string()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Format this entry as a markdown block for the recovery log.
    fn to_markdown(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "## {} {}: {}\n",
            self.timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            self.category,
            self.description,
        ));
        out.push('\n');

        for (key, value) in &self.fields {
            out.push_str(&format!("{}: {}\n", key, value));
        }

        if !self.body.is_empty() {
            out.push('\n');
            out.push_str("```text\n");
            out.push_str(&self.body);
            if !self.body.ends_with('\n') {
                out.push('\n');
            }
            out.push_str("```\n");
        }

        out.push('\n');
        out.push_str("---\n");
        out
    }
}

/// Return the path to the recovery log file.
pub fn recovery_log_path(home: &Path) -> PathBuf {
    home.join(".recovery.log")
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Append a recovery entry to the log. Errors are swallowed and printed to stderr.
pub fn log_recovery(home: &Path, entry: RecoveryEntry) {
    if let Err(e) = log_recovery_inner(home, entry) {
        eprintln!("warning: could not write to recovery log: {}", e);
    }
}

fn log_recovery_inner(home: &Path, entry: RecoveryEntry) -> io::Result<()> {
    let path = recovery_log_path(home);
    let needs_header = std::fs::metadata(&path).map_or(true, |m| m.len() == 0);

    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    if needs_header {
        file.write_all(FILE_HEADER.as_bytes())?;
    }
    file.write_all(entry.to_markdown().as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn atomic_write_replaces_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snippets.json");
        fs::write(&path, "old").unwrap();
        atomic_write(&path, b"[]").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn log_writes_header_once() {
        let dir = TempDir::new().unwrap();
        log_recovery(
            dir.path(),
            RecoveryEntry::new(RecoveryCategory::Index, "corrupt index")
                .field("File", "snippets.json")
                .body("{not json"),
        );
        log_recovery(
            dir.path(),
            RecoveryEntry::new(RecoveryCategory::Write, "index write failed"),
        );

        let log = fs::read_to_string(recovery_log_path(dir.path())).unwrap();
        assert_eq!(log.matches("stash recovery log").count(), 1);
        assert!(log.contains("index: corrupt index"));
        assert!(log.contains("File: snippets.json"));
        assert!(log.contains("```text\n{not json\n```"));
        assert!(log.contains("write: index write failed"));
    }

    #[test]
    fn log_into_missing_home_does_not_panic() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        log_recovery(
            &missing,
            RecoveryEntry::new(RecoveryCategory::Write, "index write failed"),
        );
        assert!(!recovery_log_path(&missing).exists());
    }
}
