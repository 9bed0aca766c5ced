use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::io::recovery::atomic_write;
use crate::model::snippet::{DEFAULT_FOLDER, DEFAULT_NAME, Snippet, file_name, split_file_name};

/// Error type for operations that touch a snippet's backing file
#[derive(Debug, thiserror::Error)]
pub enum SnippetOpError {
    #[error("{} already exists", path.display())]
    NameCollision { path: PathBuf },
    #[error("name cannot be empty")]
    EmptyName,
    #[error("invalid name: {0}")]
    InvalidName(String),
    #[error("{}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> SnippetOpError + '_ {
    move |source| SnippetOpError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Split `folder/name.ext` into `(folder, name, language)`.
///
/// A missing folder becomes `Misc`, a missing name `Untitled Snippet`, and a
/// missing extension the configured default language.
pub fn parse_name(input: &str, default_language: &str) -> (String, String, String) {
    let input = input.trim();
    let (folder, rest) = match input.split_once('/') {
        Some((folder, rest)) => (folder.trim(), rest.trim()),
        None => ("", input),
    };
    // nested folders are not supported; keep the file name flat
    let rest = rest.replace('/', "-");
    let (name, language) = split_file_name(&rest);

    let folder = if folder.is_empty() { DEFAULT_FOLDER } else { folder };
    let name = if name.is_empty() { DEFAULT_NAME } else { name };
    let language = if language.is_empty() {
        default_language
    } else {
        language
    };
    (folder.to_string(), name.to_string(), language.to_string())
}

/// Split a tag list on spaces and commas. Duplicates are dropped, first
/// occurrence wins.
pub fn parse_tags(input: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in input.split(|c: char| c.is_whitespace() || c == ',') {
        if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

/// Reject names that cannot be a single path component
fn check_component(name: &str) -> Result<(), SnippetOpError> {
    if name.is_empty() {
        return Err(SnippetOpError::EmptyName);
    }
    if name == "." || name == ".." || name.contains('/') || name.contains('\\') {
        return Err(SnippetOpError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Validate a folder name typed by the user. Empty means `Misc`; hidden
/// names are refused because discovery never looks inside them.
pub fn folder_name(input: &str) -> Result<String, SnippetOpError> {
    let folder = match input.trim() {
        "" => DEFAULT_FOLDER,
        f => f,
    };
    check_component(folder)?;
    if folder.starts_with('.') {
        return Err(SnippetOpError::InvalidName(folder.to_string()));
    }
    Ok(folder.to_string())
}

/// Build the snippet described by the two inputs of the create dialog. An
/// empty name means `Untitled Snippet`; a name without extension gets
/// `default_language`.
pub fn new_snippet(
    folder: &str,
    name: &str,
    default_language: &str,
) -> Result<Snippet, SnippetOpError> {
    let folder = folder_name(folder)?;

    let (stem, language) = split_file_name(name.trim());
    let stem = if stem.is_empty() { DEFAULT_NAME } else { stem };
    let language = if language.is_empty() {
        default_language
    } else {
        language
    };
    let file = file_name(stem, language);
    check_component(&file)?;
    Ok(Snippet::new(&folder, stem, &file, language))
}

/// Create the backing file for `snippet` holding `content`. Never overwrites:
/// an existing file at the target path is a `NameCollision`.
pub fn create_snippet_file(
    home: &Path,
    snippet: &Snippet,
    content: &[u8],
) -> Result<(), SnippetOpError> {
    let dir = home.join(&snippet.folder);
    fs::create_dir_all(&dir).map_err(io_err(&dir))?;

    let path = dir.join(&snippet.file);
    let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Err(SnippetOpError::NameCollision { path });
        }
        Err(e) => return Err(io_err(&path)(e)),
    };
    file.write_all(content).map_err(io_err(&path))
}

/// Replace the body of an existing snippet. The file must already exist.
pub fn replace_content(home: &Path, snippet: &Snippet, content: &[u8]) -> Result<(), SnippetOpError> {
    let path = home.join(snippet.path());
    if !path.is_file() {
        return Err(io_err(&path)(io::Error::from(io::ErrorKind::NotFound)));
    }
    atomic_write(&path, content).map_err(io_err(&path))
}

/// Rename a snippet. `input` is the new file name, `name` or `name.ext`;
/// without an extension the current language is kept. Input equal to the
/// current file name changes nothing. The backing file is renamed first,
/// and the snippet is only updated once that succeeds.
pub fn rename_snippet(
    home: &Path,
    snippet: &mut Snippet,
    input: &str,
) -> Result<(), SnippetOpError> {
    let input = input.trim();
    if input == snippet.file {
        return Ok(());
    }
    let (stem, language) = split_file_name(input);
    if stem.is_empty() {
        return Err(SnippetOpError::EmptyName);
    }
    let language = if language.is_empty() {
        snippet.language.clone()
    } else {
        language.to_string()
    };
    let file = file_name(stem, &language);
    check_component(&file)?;

    if file != snippet.file {
        let from = home.join(snippet.path());
        let to = home.join(&snippet.folder).join(&file);
        move_file(&from, &to)?;
    }

    snippet.name = stem.to_string();
    snippet.file = file;
    snippet.language = language;
    Ok(())
}

/// Move a snippet's backing file into another folder directory.
pub fn move_to_folder(
    home: &Path,
    snippet: &mut Snippet,
    folder: &str,
) -> Result<(), SnippetOpError> {
    if folder.trim().is_empty() {
        return Err(SnippetOpError::EmptyName);
    }
    let folder = folder_name(folder)?;
    if folder == snippet.folder {
        return Ok(());
    }

    let dir = home.join(&folder);
    let from = home.join(snippet.path());
    let to = dir.join(&snippet.file);
    if to.exists() {
        return Err(SnippetOpError::NameCollision { path: to });
    }
    fs::create_dir_all(&dir).map_err(io_err(&dir))?;
    move_file(&from, &to)?;

    // best-effort: an emptied folder directory would otherwise linger
    let _ = fs::remove_dir(home.join(&snippet.folder));
    snippet.folder = folder;
    Ok(())
}

/// Delete a snippet's backing file. A file that is already gone counts as
/// deleted.
pub fn delete_snippet(home: &Path, snippet: &Snippet) -> Result<(), SnippetOpError> {
    let path = home.join(snippet.path());
    match fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(io_err(&path)(e)),
    }
}

fn move_file(from: &Path, to: &Path) -> Result<(), SnippetOpError> {
    if to.exists() {
        return Err(SnippetOpError::NameCollision {
            path: to.to_path_buf(),
        });
    }
    fs::rename(from, to).map_err(io_err(from))
}
