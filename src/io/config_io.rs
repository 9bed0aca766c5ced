use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::model::config::{Config, user_home};

/// Location of config.toml: `$STASH_CONFIG`, else
/// `$XDG_CONFIG_HOME/stash/config.toml`, else `~/.config/stash/config.toml`
pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("STASH_CONFIG")
        && !path.is_empty()
    {
        return PathBuf::from(path);
    }
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| user_home().join(".config"))
        .join("stash")
        .join("config.toml")
}

/// Read the configuration from the default file and the process environment.
pub fn read_config() -> Config {
    read_config_with(&config_path(), |key| std::env::var(key).ok())
}

/// Read the configuration from `path`, then apply `STASH_*` overrides looked
/// up through `env`. Anything malformed yields the built-in defaults.
pub fn read_config_with(path: &Path, env: impl Fn(&str) -> Option<String>) -> Config {
    let mut config = match fs::read_to_string(path) {
        Ok(text) => match toml::from_str::<Config>(&text) {
            Ok(config) => config,
            Err(_) => return Config::default(),
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => Config::default(),
        Err(_) => return Config::default(),
    };

    let var = |key: &str| env(key).filter(|v| !v.is_empty());
    if let Some(home) = var("STASH_HOME") {
        config.home = PathBuf::from(home);
    }
    if let Some(file) = var("STASH_FILE") {
        config.file = file;
    }
    if let Some(language) = var("STASH_DEFAULT_LANGUAGE") {
        config.default_language = language;
    }

    config.home = expand_tilde(&config.home, &user_home());
    config
}

/// Expand a leading `~` to `user_home`
fn expand_tilde(path: &Path, user_home: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => user_home.join(rest),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = read_config_with(&dir.path().join("config.toml"), no_env);
        assert_eq!(config, Config::default());
        assert_eq!(config.file, "snippets.json");
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r##"home = "/srv/snips"
default_language = "rs"

[colors]
primary = "#112233"
"##,
        )
        .unwrap();
        let config = read_config_with(&path, no_env);
        assert_eq!(config.home, PathBuf::from("/srv/snips"));
        assert_eq!(config.file, "snippets.json");
        assert_eq!(config.default_language, "rs");
        assert_eq!(config.colors.get("primary").map(String::as_str), Some("#112233"));
    }

    #[test]
    fn env_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "file = \"index.json\"\n").unwrap();
        let env: HashMap<&str, &str> = [
            ("STASH_HOME", "/tmp/elsewhere"),
            ("STASH_FILE", "meta.json"),
            ("STASH_DEFAULT_LANGUAGE", ""),
        ]
        .into_iter()
        .collect();
        let config = read_config_with(&path, |k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.home, PathBuf::from("/tmp/elsewhere"));
        assert_eq!(config.file, "meta.json");
        // empty values are ignored
        assert_eq!(config.default_language, "go");
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "home = [unterminated").unwrap();
        let env = |k: &str| (k == "STASH_FILE").then(|| "ignored.json".to_string());
        let config = read_config_with(&path, env);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn tilde_expands_to_user_home() {
        let home = Path::new("/home/someone");
        assert_eq!(
            expand_tilde(Path::new("~/snips"), home),
            PathBuf::from("/home/someone/snips")
        );
        assert_eq!(
            expand_tilde(Path::new("/abs/~x"), home),
            PathBuf::from("/abs/~x")
        );
    }
}
