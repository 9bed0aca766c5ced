//! Integration tests for the `stash` CLI.
//!
//! Each test creates a temp storage home, runs `stash` as a subprocess,
//! and verifies stdout and/or file contents.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

/// A `stash` command isolated to `home`, with no config file.
fn stash(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_stash"));
    cmd.env("STASH_HOME", home)
        .env("STASH_CONFIG", home.join("no-config.toml"))
        .env_remove("STASH_FILE")
        .env_remove("STASH_DEFAULT_LANGUAGE")
        .stdin(Stdio::null());
    cmd
}

fn run(home: &Path, args: &[&str]) -> Output {
    let output = stash(home).args(args).output().unwrap();
    assert!(
        output.status.success(),
        "stash {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn write_file(home: &Path, rel: &str, body: &str) {
    let path = home.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

#[test]
fn list_discovers_files_and_writes_index() {
    let home = TempDir::new().unwrap();
    write_file(home.path(), "Notes/todo.md", "- milk\n");
    write_file(home.path(), "Misc/hello.go", "package main\n");

    let out = stdout(&run(home.path(), &["list"]));
    assert!(out.lines().any(|l| l == "Notes/todo.md"));
    assert!(out.lines().any(|l| l == "Misc/hello.go"));

    let index = fs::read_to_string(home.path().join("snippets.json")).unwrap();
    assert!(index.contains("\"todo.md\""));
    assert!(index.contains("\"hello.go\""));
}

#[test]
fn list_shows_tags() {
    let home = TempDir::new().unwrap();
    write_file(home.path(), "Misc/a.go", "");
    write_file(
        home.path(),
        "snippets.json",
        r#"[{"folder":"Misc","name":"a","file":"a.go","language":"go","date":"2024-01-01T00:00:00Z","tags":["x","y"]}]"#,
    );
    let out = stdout(&run(home.path(), &["list"]));
    assert_eq!(out, "Misc/a.go  #x  #y\n");
}

#[test]
fn lookup_prints_best_match_verbatim() {
    let home = TempDir::new().unwrap();
    write_file(home.path(), "Misc/hello.go", "package main\n\nfunc main() {}\n");
    write_file(home.path(), "Misc/world.py", "print('hi')\n");

    let out = stdout(&run(home.path(), &["hello"]));
    assert_eq!(out, "package main\n\nfunc main() {}\n");
}

#[test]
fn lookup_without_match_prints_nothing() {
    let home = TempDir::new().unwrap();
    write_file(home.path(), "Misc/hello.go", "package main\n");
    // first run builds the index
    run(home.path(), &["list"]);

    let out = stdout(&run(home.path(), &["zzzz"]));
    assert_eq!(out, "");
}

#[test]
fn stdin_is_saved_as_new_snippet() {
    let home = TempDir::new().unwrap();
    write_file(home.path(), "Misc/old.go", "");
    run(home.path(), &["list"]);

    let mut child = stash(home.path())
        .arg("Scripts/hi.sh")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"echo hi\n")
        .unwrap();
    assert!(child.wait_with_output().unwrap().status.success());

    assert_eq!(
        fs::read_to_string(home.path().join("Scripts/hi.sh")).unwrap(),
        "echo hi\n"
    );
    let out = stdout(&run(home.path(), &["list"]));
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines, vec!["Scripts/hi.sh", "Misc/old.go"]);
}

#[test]
fn stdin_name_keeps_every_word() {
    let home = TempDir::new().unwrap();
    let mut child = stash(home.path())
        .args(["Work", "Notes/deploy", "steps.md"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"1. push\n")
        .unwrap();
    assert!(child.wait_with_output().unwrap().status.success());

    assert_eq!(
        fs::read_to_string(home.path().join("Work Notes/deploy steps.md")).unwrap(),
        "1. push\n"
    );
    let out = stdout(&run(home.path(), &["list"]));
    assert_eq!(out.lines().collect::<Vec<_>>(), vec!["Work Notes/deploy steps.md"]);
}

#[test]
fn corrupt_index_is_backed_up_and_rebuilt() {
    let home = TempDir::new().unwrap();
    write_file(home.path(), "Misc/a.go", "");
    write_file(home.path(), "snippets.json", "{not json");

    let out = stdout(&run(home.path(), &["list"]));
    assert!(out.lines().any(|l| l == "Misc/a.go"));
    assert_eq!(
        fs::read_to_string(home.path().join("snippets.json.bak")).unwrap(),
        "{not json"
    );
    let index = fs::read_to_string(home.path().join("snippets.json")).unwrap();
    assert!(index.contains("\"a.go\""));
}

#[test]
fn help_shows_usage() {
    let home = TempDir::new().unwrap();
    let out = stdout(&run(home.path(), &["--help"]));
    assert!(out.contains("stash list"));
    assert!(out.contains("save snippet from stdin"));
}
