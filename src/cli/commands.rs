use clap::{Parser, Subcommand};

const USAGE: &str = "\
Usage:
  stash            interactive mode
  stash list       list all snippets
  stash <snippet>  print the best matching snippet to stdout

Create:
  stash < main.go                  save snippet from stdin
  stash example/main.go < main.go  save snippet with a name";

#[derive(Parser, Debug)]
#[command(
    name = "stash",
    about = concat!("stash v", env!("CARGO_PKG_VERSION"), " - a snippet manager for your terminal"),
    version,
    args_conflicts_with_subcommands = true,
    after_help = USAGE
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Snippet to print (fuzzy matched), or the `folder/name.ext` to save stdin as
    pub query: Vec<String>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// List all snippets
    List,
}
