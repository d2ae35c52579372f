//! stratavec CLI: glossary search demo over the in-memory vector store.
//!
//! Every run loads a glossary (the built-in sample or `--data FILE`), embeds
//! each entry with the hashing embedder, and answers one command:
//! - `stratavec search <QUERY> [--k N] [--category C]`
//! - `stratavec info`
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

mod commands;
mod format;
mod glossary;

use std::process;

use clap::ArgMatches;
use stratavec_intelligence::{search_text, HashingEmbedder};
use stratavec_primitives::{Collection, Filter};
use tracing_subscriber::EnvFilter;

use commands::build_cli;
use format::{format_error, format_info, format_results, OutputMode};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = build_cli().get_matches();
    let Some((name, sub)) = matches.subcommand() else {
        process::exit(2);
    };

    let mode = if sub.get_flag("json") {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    match run(name, sub, mode) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("{}", format_error(&e, mode));
            process::exit(1);
        }
    }
}

fn run(name: &str, matches: &ArgMatches, mode: OutputMode) -> Result<String, String> {
    let dimension = matches
        .get_one::<usize>("dimension")
        .copied()
        .unwrap_or(commands::DEFAULT_DIMENSION);
    let embedder = HashingEmbedder::new(dimension).map_err(|e| e.to_string())?;

    let store = glossary::open_store(matches.get_one::<String>("config").map(String::as_str))?;
    let entries = glossary::load_entries(matches.get_one::<String>("data").map(String::as_str))?;
    let collection = glossary::load_collection(&store, &entries, &embedder)?;

    match name {
        "search" => search(&collection, &embedder, matches, mode),
        "info" => {
            let info = collection.info().map_err(|e| e.to_string())?;
            Ok(format_info(&info, mode))
        }
        other => Err(format!("Unknown command: {}", other)),
    }
}

fn search(
    collection: &Collection,
    embedder: &HashingEmbedder,
    matches: &ArgMatches,
    mode: OutputMode,
) -> Result<String, String> {
    let query = matches
        .get_one::<String>("query")
        .ok_or("Missing query")?;
    let k = matches.get_one::<usize>("k").copied().unwrap_or(5);
    let filter = matches
        .get_one::<String>("category")
        .map(|c| Filter::eq("category", c.as_str()));

    let results =
        search_text(collection, embedder, query, k, filter.as_ref()).map_err(|e| e.to_string())?;
    Ok(format_results(&results, mode))
}
