use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::model::snippet::Snippet;

/// A problem met while reconciling. None of these stop reconciliation; they
/// are collected and reported by the caller.
#[derive(Debug, thiserror::Error)]
pub enum SyncIssue {
    #[error("could not scan storage home {path}: {source}")]
    HomeUnavailable { path: PathBuf, source: io::Error },
    #[error("could not scan {path}: {source}")]
    FolderUnreadable { path: PathBuf, source: io::Error },
    #[error("could not access {path}: {source}")]
    StatFailed { path: PathBuf, source: io::Error },
    #[error("could not create {path}: {source}")]
    CreateFolderFailed { path: PathBuf, source: io::Error },
    #[error("could not move {from} to {to}: {source}")]
    MigrationFailed {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },
    #[error("not moving {from}: {to} already exists")]
    MigrationCollision { from: PathBuf, to: PathBuf },
}

/// Outcome of one reconciliation run
#[derive(Debug, Default)]
pub struct Reconciliation {
    /// The corrected index
    pub snippets: Vec<Snippet>,
    /// Everything that went wrong along the way
    pub issues: Vec<SyncIssue>,
    /// True when any pass altered the index (or moved files), meaning the
    /// index must be saved
    pub changed: bool,
}

/// Align the index with the files under `home`.
///
/// Runs three passes in order: legacy `Folder-File` migration, discovery of
/// untracked files, and pruning of entries whose file is gone. If `home`
/// cannot be read at all the index is returned untouched.
pub fn reconcile(home: &Path, snippets: Vec<Snippet>) -> Reconciliation {
    let mut rec = Reconciliation {
        snippets,
        ..Default::default()
    };

    if let Err(source) = fs::read_dir(home) {
        rec.issues.push(SyncIssue::HomeUnavailable {
            path: home.to_path_buf(),
            source,
        });
        return rec;
    }

    migrate_legacy_paths(home, &mut rec);
    discover_untracked(home, &mut rec);
    prune_missing(home, &mut rec);
    rec
}

/// Move `home/Folder-File` to `home/Folder/File` for every indexed snippet
/// that still uses the flat layout.
fn migrate_legacy_paths(home: &Path, rec: &mut Reconciliation) {
    for snippet in &rec.snippets {
        let legacy = home.join(snippet.legacy_path());
        match fs::metadata(&legacy) {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => continue,
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(source) => {
                rec.issues.push(SyncIssue::StatFailed {
                    path: legacy,
                    source,
                });
                continue;
            }
        }

        let folder_dir = home.join(&snippet.folder);
        let target = folder_dir.join(&snippet.file);

        if target.exists() {
            rec.issues.push(SyncIssue::MigrationCollision {
                from: legacy,
                to: target,
            });
            continue;
        }
        if let Err(source) = fs::create_dir_all(&folder_dir) {
            rec.issues.push(SyncIssue::CreateFolderFailed {
                path: folder_dir,
                source,
            });
            continue;
        }
        if let Err(source) = fs::rename(&legacy, &target) {
            rec.issues.push(SyncIssue::MigrationFailed {
                from: legacy,
                to: target,
                source,
            });
            continue;
        }

        rec.changed = true;
    }
}

/// Append a snippet for every file in a folder directory that no indexed
/// path refers to yet.
fn discover_untracked(home: &Path, rec: &mut Reconciliation) {
    let mut tracked: HashSet<PathBuf> = rec.snippets.iter().map(Snippet::path).collect();

    let folders = match sorted_entries(home) {
        Ok(entries) => entries,
        Err(source) => {
            rec.issues.push(SyncIssue::HomeUnavailable {
                path: home.to_path_buf(),
                source,
            });
            return;
        }
    };

    for (folder, folder_path) in folders {
        if folder.starts_with('.') || !folder_path.is_dir() {
            continue;
        }

        let files = match sorted_entries(&folder_path) {
            Ok(entries) => entries,
            Err(source) => {
                rec.issues.push(SyncIssue::FolderUnreadable {
                    path: folder_path,
                    source,
                });
                continue;
            }
        };

        for (file, file_path) in files {
            if file_path.is_dir() {
                continue;
            }
            let snippet = Snippet::discovered(&folder, &file);
            if tracked.insert(snippet.path()) {
                rec.snippets.push(snippet);
                rec.changed = true;
            }
        }
    }
}

/// Drop entries whose backing file no longer exists, plus any repeat of an
/// already-seen path. Survivors keep their relative order.
fn prune_missing(home: &Path, rec: &mut Reconciliation) {
    let before = rec.snippets.len();
    let mut seen = HashSet::new();
    let issues = &mut rec.issues;

    rec.snippets.retain(|snippet| {
        let path = snippet.path();
        if !seen.insert(path.clone()) {
            return false;
        }
        match fs::metadata(home.join(&path)) {
            Ok(_) => true,
            Err(e) if e.kind() == io::ErrorKind::NotFound => false,
            Err(source) => {
                issues.push(SyncIssue::StatFailed {
                    path: home.join(path),
                    source,
                });
                true
            }
        }
    });

    if rec.snippets.len() != before {
        rec.changed = true;
    }
}

/// Directory entries with UTF-8 names, sorted by name
fn sorted_entries(dir: &Path) -> io::Result<Vec<(String, PathBuf)>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if let Some(name) = entry.file_name().to_str() {
            entries.push((name.to_string(), entry.path()));
        }
    }
    entries.sort();
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn touch(home: &Path, rel: &str) {
        let path = home.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
    }

    fn paths(snippets: &[Snippet]) -> Vec<String> {
        snippets
            .iter()
            .map(|s| format!("{}/{}", s.folder, s.file))
            .collect()
    }

    #[test]
    fn discovers_untracked_file() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "Notes/todo.md");

        let rec = reconcile(dir.path(), Vec::new());
        assert!(rec.changed);
        assert_eq!(rec.snippets.len(), 1);
        let s = &rec.snippets[0];
        assert_eq!(s.folder, "Notes");
        assert_eq!(s.file, "todo.md");
        assert_eq!(s.name, "todo");
        assert_eq!(s.language, "md");
    }

    #[test]
    fn discovery_skips_dot_dirs_nested_dirs_and_root_files() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), ".git/config");
        touch(dir.path(), "Notes/deep/inner.txt");
        touch(dir.path(), "snippets.json");
        touch(dir.path(), "Notes/Makefile");

        let rec = reconcile(dir.path(), Vec::new());
        assert_eq!(paths(&rec.snippets), vec!["Notes/Makefile"]);
        assert_eq!(rec.snippets[0].language, "");
    }

    #[test]
    fn tracked_files_are_not_duplicated() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "Notes/todo.md");
        let existing = Snippet::new("Notes", "My todo list", "todo.md", "md");

        let rec = reconcile(dir.path(), vec![existing.clone()]);
        assert!(!rec.changed);
        assert_eq!(rec.snippets, vec![existing]);
    }

    #[test]
    fn prunes_missing_and_keeps_order() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "A/one.txt");
        touch(dir.path(), "C/three.txt");
        let index = vec![
            Snippet::discovered("A", "one.txt"),
            Snippet::discovered("Work", "plan.txt"),
            Snippet::discovered("C", "three.txt"),
        ];

        let rec = reconcile(dir.path(), index);
        assert!(rec.changed);
        assert_eq!(paths(&rec.snippets), vec!["A/one.txt", "C/three.txt"]);
    }

    #[test]
    fn prunes_repeated_paths() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "A/one.txt");
        let first = Snippet::new("A", "first", "one.txt", "txt");
        let second = Snippet::new("A", "second", "one.txt", "txt");

        let rec = reconcile(dir.path(), vec![first.clone(), second]);
        assert!(rec.changed);
        assert_eq!(rec.snippets, vec![first]);
    }

    #[test]
    fn migrates_legacy_flat_layout() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "Work-plan.txt");
        let index = vec![Snippet::new("Work", "plan", "plan.txt", "txt")];

        let rec = reconcile(dir.path(), index);
        assert!(rec.changed);
        assert!(rec.issues.is_empty());
        assert!(dir.path().join("Work/plan.txt").is_file());
        assert!(!dir.path().join("Work-plan.txt").exists());
        assert_eq!(rec.snippets.len(), 1);
        assert_eq!(rec.snippets[0].file, "plan.txt");
    }

    #[test]
    fn migration_does_not_clobber_nested_file() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "Work-plan.txt");
        fs::create_dir_all(dir.path().join("Work")).unwrap();
        fs::write(dir.path().join("Work/plan.txt"), "keep me").unwrap();
        let index = vec![Snippet::new("Work", "plan", "plan.txt", "txt")];

        let rec = reconcile(dir.path(), index);
        assert!(matches!(
            rec.issues.as_slice(),
            [SyncIssue::MigrationCollision { .. }]
        ));
        assert_eq!(
            fs::read_to_string(dir.path().join("Work/plan.txt")).unwrap(),
            "keep me"
        );
        assert!(dir.path().join("Work-plan.txt").exists());
        assert_eq!(rec.snippets.len(), 1);
    }

    #[test]
    fn missing_home_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("absent");
        let index = vec![Snippet::discovered("Work", "plan.txt")];

        let rec = reconcile(&home, index.clone());
        assert!(!rec.changed);
        assert_eq!(rec.snippets, index);
        assert!(matches!(
            rec.issues.as_slice(),
            [SyncIssue::HomeUnavailable { .. }]
        ));
    }

    #[test]
    fn second_run_changes_nothing() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "Notes/todo.md");
        touch(dir.path(), "Work-plan.txt");
        let index = vec![
            Snippet::new("Work", "plan", "plan.txt", "txt"),
            Snippet::discovered("Gone", "x.rs"),
        ];

        let first = reconcile(dir.path(), index);
        assert!(first.changed);
        let second = reconcile(dir.path(), first.snippets.clone());
        assert!(!second.changed);
        assert_eq!(second.snippets, first.snippets);
    }
}
