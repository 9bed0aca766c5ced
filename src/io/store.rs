use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::io::recovery::atomic_write;
use crate::model::snippet::Snippet;

/// Error type for index I/O
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not parse {path}: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("could not serialize the index: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Load the index. A missing file is created holding an empty array.
pub fn load_index(path: &Path) -> Result<Vec<Snippet>, StoreError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            create_empty_index(path)?;
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    serde_json::from_str(&text).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

fn create_empty_index(path: &Path) -> Result<(), StoreError> {
    let write_err = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(write_err)?;
    }
    atomic_write(path, b"[]").map_err(write_err)
}

/// Serialize the full index as written to disk
pub fn serialize_index(snippets: &[Snippet]) -> Result<String, StoreError> {
    let mut content = serde_json::to_string_pretty(snippets)?;
    content.push('\n');
    Ok(content)
}

/// Overwrite the index file with `snippets`
pub fn save_index(path: &Path, snippets: &[Snippet]) -> Result<(), StoreError> {
    let content = serialize_index(snippets)?;
    atomic_write(path, content.as_bytes()).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Copy an unreadable index next to itself as `<file>.bak`
pub fn backup_index(path: &Path) -> io::Result<PathBuf> {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".bak");
    let bak = path.with_file_name(name);
    fs::copy(path, &bak)?;
    Ok(bak)
}
