use std::fs;
use std::io;
use std::path::PathBuf;

use crate::io::recovery::{RecoveryCategory, RecoveryEntry, log_recovery};
use crate::io::store::{StoreError, backup_index, load_index, save_index, serialize_index};
use crate::model::config::Config;
use crate::model::snippet::Snippet;
use crate::ops::reconcile::{SyncIssue, reconcile};

/// Something that went wrong while loading the library. Loading always
/// produces a usable (possibly empty) index; these are reported alongside it.
#[derive(Debug, thiserror::Error)]
pub enum LoadIssue {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Sync(#[from] SyncIssue),
    #[error("could not back up {path}: {source}")]
    Backup { path: PathBuf, source: io::Error },
}

/// The reconciled index plus everything worth telling the user about
#[derive(Debug, Default)]
pub struct Library {
    pub snippets: Vec<Snippet>,
    pub issues: Vec<LoadIssue>,
}

/// Load the index and reconcile it with the storage home, saving once if
/// anything changed.
///
/// A corrupt index is backed up to `<file>.bak`, copied into the recovery
/// log, and treated as empty so discovery can rebuild it. An index that
/// cannot be read at all is left alone on disk.
pub fn load_library(config: &Config) -> Library {
    let path = config.index_path();
    let mut issues = Vec::new();
    let mut rebuild = false;
    let mut writable = true;

    let snippets = match load_index(&path) {
        Ok(snippets) => snippets,
        Err(err @ StoreError::Corrupt { .. }) => {
            preserve_corrupt_index(config, &mut issues);
            issues.push(err.into());
            rebuild = true;
            Vec::new()
        }
        Err(err) => {
            issues.push(err.into());
            writable = false;
            Vec::new()
        }
    };

    let rec = reconcile(&config.home, snippets);
    issues.extend(rec.issues.into_iter().map(LoadIssue::from));

    if writable
        && (rec.changed || rebuild)
        && let Err(e) = save_library(config, &rec.snippets)
    {
        issues.push(e.into());
    }

    Library {
        snippets: rec.snippets,
        issues,
    }
}

fn preserve_corrupt_index(config: &Config, issues: &mut Vec<LoadIssue>) {
    let path = config.index_path();
    if let Err(source) = backup_index(&path) {
        issues.push(LoadIssue::Backup {
            path: path.clone(),
            source,
        });
    }
    let raw = fs::read(&path).unwrap_or_default();
    log_recovery(
        &config.home,
        RecoveryEntry::new(RecoveryCategory::Index, "index could not be parsed")
            .field("file", path.display())
            .body(String::from_utf8_lossy(&raw)),
    );
}

/// Write the index. On failure the serialized index is copied into the
/// recovery log before the error is returned.
pub fn save_library(config: &Config, snippets: &[Snippet]) -> Result<(), StoreError> {
    let path = config.index_path();
    save_index(&path, snippets).inspect_err(|e| {
        let body = serialize_index(snippets).unwrap_or_default();
        log_recovery(
            &config.home,
            RecoveryEntry::new(RecoveryCategory::Write, "index could not be saved")
                .field("file", path.display())
                .field("error", e)
                .body(body),
        );
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::recovery::recovery_log_path;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> Config {
        Config {
            home: dir.path().to_path_buf(),
            ..Config::default()
        }
    }

    #[test]
    fn fresh_home_gets_empty_index() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let lib = load_library(&config);
        assert!(lib.snippets.is_empty());
        assert!(lib.issues.is_empty());
        assert_eq!(fs::read_to_string(config.index_path()).unwrap(), "[]");
    }

    #[test]
    fn discovery_is_saved() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("Notes")).unwrap();
        fs::write(dir.path().join("Notes/todo.md"), "x").unwrap();
        let config = config_in(&dir);

        let lib = load_library(&config);
        assert_eq!(lib.snippets.len(), 1);
        let on_disk = load_index(&config.index_path()).unwrap();
        assert_eq!(on_disk, lib.snippets);
    }

    #[test]
    fn corrupt_index_is_backed_up_and_rebuilt() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        fs::create_dir_all(dir.path().join("Notes")).unwrap();
        fs::write(dir.path().join("Notes/todo.md"), "x").unwrap();
        fs::write(config.index_path(), "{not json").unwrap();

        let lib = load_library(&config);
        assert!(matches!(
            lib.issues.as_slice(),
            [LoadIssue::Store(StoreError::Corrupt { .. })]
        ));
        assert_eq!(lib.snippets.len(), 1);

        let bak = dir.path().join("snippets.json.bak");
        assert_eq!(fs::read_to_string(bak).unwrap(), "{not json");
        let log = fs::read_to_string(recovery_log_path(dir.path())).unwrap();
        assert!(log.contains("{not json"));
        assert_eq!(load_index(&config.index_path()).unwrap(), lib.snippets);
    }

    #[test]
    fn corrupt_index_in_empty_home_is_still_replaced() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        fs::write(config.index_path(), "garbage").unwrap();

        let lib = load_library(&config);
        assert!(lib.snippets.is_empty());
        assert!(load_index(&config.index_path()).unwrap().is_empty());
    }
}
