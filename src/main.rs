use clap::Parser;
use stash::cli::commands::Cli;
use stash::cli::handlers;
use stash::io::config_io;
use stash::ops::library::load_library;

fn main() {
    let cli = Cli::parse();
    let config = config_io::read_config();

    // Load and reconcile before anything else so the index on disk reflects
    // the storage home even if the TUI fails to start.
    let library = load_library(&config);
    handlers::print_issues(&library.issues);

    if let Err(e) = handlers::dispatch(cli, &config, library.snippets) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
