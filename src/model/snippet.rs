use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Folder used when none is given
pub const DEFAULT_FOLDER: &str = "Misc";

/// Name used when none is given
pub const DEFAULT_NAME: &str = "Untitled Snippet";

/// One managed snippet. The body lives in `<home>/<folder>/<file>` and is
/// never stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    #[serde(default = "default_folder", deserialize_with = "folder_or_default")]
    pub folder: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub language: String,
    /// Creation time, set once. The offset it was written with is kept.
    #[serde(default = "unix_epoch", serialize_with = "rfc3339")]
    pub date: DateTime<FixedOffset>,
    /// Older indexes wrote `null` for an empty tag list
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
}

impl Snippet {
    /// Create a snippet stamped with the current time and no tags.
    pub fn new(folder: &str, name: &str, file: &str, language: &str) -> Self {
        Snippet {
            folder: folder.to_string(),
            name: name.to_string(),
            file: file.to_string(),
            language: language.to_string(),
            date: Utc::now().fixed_offset(),
            tags: Vec::new(),
        }
    }

    /// Build a snippet for a file found on disk: name and language come
    /// from splitting the file name on its last `.`.
    pub fn discovered(folder: &str, file: &str) -> Self {
        let (name, language) = split_file_name(file);
        Snippet::new(folder, name, file, language)
    }

    /// Location relative to the storage home (`folder/file`)
    pub fn path(&self) -> PathBuf {
        PathBuf::from(&self.folder).join(&self.file)
    }

    /// Flat `folder-file` name used by the old on-disk layout
    pub fn legacy_path(&self) -> String {
        format!("{}-{}", self.folder, self.file)
    }

    /// Text the fuzzy matcher scores against
    pub fn search_text(&self) -> String {
        let mut text = format!("{} {}", self.name, self.language);
        for tag in &self.tags {
            text.push(' ');
            text.push_str(tag);
        }
        text
    }
}

impl fmt::Display for Snippet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.folder, self.file)?;
        for tag in &self.tags {
            write!(f, "  #{}", tag)?;
        }
        Ok(())
    }
}

/// Split `hello.go` into `("hello", "go")`. A file without an extension
/// (or a dot-file such as `.bashrc`) keeps its whole name and gets an
/// empty language.
pub fn split_file_name(file: &str) -> (&str, &str) {
    match file.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, ext),
        _ => (file, ""),
    }
}

/// Join a name and a language back into a file name.
pub fn file_name(name: &str, language: &str) -> String {
    if language.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", name, language)
    }
}

fn default_folder() -> String {
    DEFAULT_FOLDER.to_string()
}

fn unix_epoch() -> DateTime<FixedOffset> {
    DateTime::<Utc>::UNIX_EPOCH.fixed_offset()
}

/// RFC3339 with `Z` for a zero offset
fn rfc3339<S: Serializer>(date: &DateTime<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

fn folder_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let folder = Option::<String>::deserialize(deserializer)?;
    Ok(folder
        .filter(|f| !f.is_empty())
        .unwrap_or_else(default_folder))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_file_name_on_last_dot() {
        assert_eq!(split_file_name("todo.md"), ("todo", "md"));
        assert_eq!(split_file_name("archive.tar.gz"), ("archive.tar", "gz"));
        assert_eq!(split_file_name("Makefile"), ("Makefile", ""));
        assert_eq!(split_file_name(".bashrc"), (".bashrc", ""));
    }

    #[test]
    fn file_name_without_language() {
        assert_eq!(file_name("hello", "go"), "hello.go");
        assert_eq!(file_name("Makefile", ""), "Makefile");
    }

    #[test]
    fn derived_paths() {
        let s = Snippet::new("Work", "plan", "plan.txt", "txt");
        assert_eq!(s.path(), PathBuf::from("Work").join("plan.txt"));
        assert_eq!(s.legacy_path(), "Work-plan.txt");
    }

    #[test]
    fn discovered_derives_name_and_language() {
        let s = Snippet::discovered("Notes", "todo.md");
        assert_eq!(s.folder, "Notes");
        assert_eq!(s.name, "todo");
        assert_eq!(s.file, "todo.md");
        assert_eq!(s.language, "md");
        assert!(s.tags.is_empty());
    }

    #[test]
    fn deserialize_null_tags_and_missing_folder() {
        let s: Snippet = serde_json::from_str(
            r#"{"name":"x","file":"x.go","language":"go","date":"2023-03-01T10:00:00-05:00","tags":null}"#,
        )
        .unwrap();
        assert_eq!(s.folder, DEFAULT_FOLDER);
        assert!(s.tags.is_empty());
        assert_eq!(s.date.to_rfc3339(), "2023-03-01T10:00:00-05:00");
    }

    #[test]
    fn display_is_path_plus_tags() {
        let mut s = Snippet::new("Notes", "todo", "todo.md", "md");
        assert_eq!(s.to_string(), "Notes/todo.md");
        s.tags = vec!["work".into(), "urgent".into()];
        assert_eq!(s.to_string(), "Notes/todo.md  #work  #urgent");
    }

    #[test]
    fn search_text_includes_tags() {
        let mut s = Snippet::new("Notes", "todo", "todo.md", "md");
        s.tags = vec!["daily".into()];
        assert_eq!(s.search_text(), "todo md daily");
    }
}
