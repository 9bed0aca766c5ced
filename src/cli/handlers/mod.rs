use std::io::{self, IsTerminal, Read, Write};

use crate::cli::commands::*;
use crate::cli::output::highlight;
use crate::io::content::read_content;
use crate::io::store::StoreError;
use crate::model::config::Config;
use crate::model::snippet::{Snippet, file_name};
use crate::ops::fuzzy::find_best;
use crate::ops::library::{LoadIssue, save_library};
use crate::ops::snippet_ops::{SnippetOpError, create_snippet_file, new_snippet, parse_name};

/// Error type for saving a snippet from stdin
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error(transparent)]
    Snippet(#[from] SnippetOpError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(
    cli: Cli,
    config: &Config,
    mut snippets: Vec<Snippet>,
) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Some(Commands::List) => {
            cmd_list(&snippets);
            Ok(())
        }
        None => {
            if let Some(content) = read_piped_stdin()? {
                let name = cli.query.join(" ");
                save_from_stdin(config, &mut snippets, &name, &content)?;
                return Ok(());
            }
            if !cli.query.is_empty() {
                return cmd_lookup(config, &snippets, &cli.query.join(" "));
            }
            crate::tui::run(config.clone(), snippets)
        }
    }
}

/// Print every load/sync problem, one per line
pub fn print_issues(issues: &[LoadIssue]) {
    for issue in issues {
        println!("{}", issue);
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

pub fn cmd_list(snippets: &[Snippet]) {
    for snippet in snippets {
        println!("{}", snippet);
    }
}

/// Print the best match for `query`. No match prints nothing.
pub fn cmd_lookup(
    config: &Config,
    snippets: &[Snippet],
    query: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(snippet) = find_best(query, snippets) else {
        return Ok(());
    };
    let content = read_content(&config.home, snippet)?;

    let mut stdout = io::stdout().lock();
    if stdout.is_terminal() {
        stdout.write_all(highlight(&content, &snippet.language).as_bytes())?;
    } else {
        stdout.write_all(content.as_bytes())?;
    }
    stdout.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

/// Stdin content when stdin is a pipe or file and not empty
fn read_piped_stdin() -> io::Result<Option<Vec<u8>>> {
    let mut stdin = io::stdin().lock();
    if stdin.is_terminal() {
        return Ok(None);
    }
    let mut buf = Vec::new();
    stdin.read_to_end(&mut buf)?;
    Ok(if buf.is_empty() { None } else { Some(buf) })
}

/// Store `content` as a new snippet named by `name` (`folder/name.ext`, any
/// part optional), prepend it to the index, and save the index.
pub fn save_from_stdin(
    config: &Config,
    snippets: &mut Vec<Snippet>,
    name: &str,
    content: &[u8],
) -> Result<Snippet, SaveError> {
    let (folder, stem, language) = parse_name(name, &config.default_language);
    let snippet = new_snippet(&folder, &file_name(&stem, &language), &config.default_language)?;

    if snippets
        .iter()
        .any(|s| s.folder == snippet.folder && s.file == snippet.file)
    {
        return Err(SnippetOpError::NameCollision {
            path: config.home.join(snippet.path()),
        }
        .into());
    }
    create_snippet_file(&config.home, &snippet, content)?;

    snippets.insert(0, snippet.clone());
    save_library(config, snippets)?;
    Ok(snippet)
}
