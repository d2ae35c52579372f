//! Clap command tree (builder API).

use clap::{value_parser, Arg, ArgAction, Command};

/// Default embedding dimension for the demo glossary.
pub const DEFAULT_DIMENSION: usize = 256;

/// Build the top-level `stratavec` command.
pub fn build_cli() -> Command {
    Command::new("stratavec")
        .about("In-memory vector search over a glossary")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Print output as JSON"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("FILE")
                .help("Store limits (TOML)"),
        )
        .arg(
            Arg::new("data")
                .long("data")
                .global(true)
                .value_name("FILE")
                .help("Glossary JSON: [{\"term\", \"definition\", \"category\"}]"),
        )
        .arg(
            Arg::new("dimension")
                .long("dimension")
                .global(true)
                .value_name("D")
                .value_parser(value_parser!(usize))
                .default_value(DEFAULT_DIMENSION.to_string())
                .help("Embedding dimension"),
        )
        .subcommand(
            Command::new("search")
                .about("Search the glossary for a phrase")
                .arg(Arg::new("query").required(true).help("Text to search for"))
                .arg(
                    Arg::new("k")
                        .long("k")
                        .short('k')
                        .value_name("N")
                        .value_parser(value_parser!(usize))
                        .default_value("5")
                        .help("Number of results"),
                )
                .arg(
                    Arg::new("category")
                        .long("category")
                        .value_name("C")
                        .help("Only return entries in this category"),
                ),
        )
        .subcommand(Command::new("info").about("Show the loaded collection"))
}
