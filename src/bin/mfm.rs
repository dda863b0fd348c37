//! Command-line interface for mfm
//! This binary is used to inspect how MFM text is tokenized and parsed.
//!
//! Usage:
//!   mfm parse [`<path>`] [--format `<format>`] [--disable `<family,...>`] [--config `<file>`]
//!   mfm tokens [`<path>`] [--format `<simple|json>`]
//!
//! Without a path (or with `-`) the text is read from stdin.

use clap::{Arg, ArgAction, ArgMatches, Command};
use mfm::mfm::config::{Loader, MfmConfig};
use mfm::mfm::formats::{format_tokens, serialize_nodes, tokens_to_json, OutputFormat};
use mfm::mfm::lexing::tokenize;
use mfm::mfm::parsing::parse;
use mfm::mfm::parsing::option::SyntaxFamily;
use std::io::Read;

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let matches = Command::new("mfm")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting MFM tokenization and parsing")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("parse")
                .about("Parse MFM text and print the node tree")
                .arg(path_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format: treeviz, json or yaml (default from config)"),
                )
                .arg(
                    Arg::new("disable")
                        .long("disable")
                        .short('d')
                        .help("Syntax families to treat as plain text, e.g. 'bold,url'")
                        .value_delimiter(',')
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .help("TOML file layered over the built-in defaults"),
                ),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the token stream")
                .arg(path_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format: simple or json")
                        .default_value("simple"),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("parse", parse_matches)) => handle_parse_command(parse_matches),
        Some(("tokens", tokens_matches)) => handle_tokens_command(tokens_matches),
        _ => unreachable!(),
    }
}

fn path_arg() -> Arg {
    Arg::new("path")
        .help("Path to the MFM text ('-' for stdin)")
        .index(1)
        .default_value("-")
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

fn read_source(matches: &ArgMatches) -> String {
    let path = matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or("-");
    let result = if path == "-" {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source).map(|_| source)
    } else {
        std::fs::read_to_string(path)
    };
    result.unwrap_or_else(|e| fail(format!("reading {}: {}", path, e)))
}

fn load_config(matches: &ArgMatches) -> MfmConfig {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    for name in matches.get_many::<String>("disable").into_iter().flatten() {
        let family: SyntaxFamily = name.parse().unwrap_or_else(|e| fail(e));
        loader = loader
            .set_family(family, false)
            .unwrap_or_else(|e| fail(e));
    }
    loader.build().unwrap_or_else(|e| fail(e))
}

/// Handle the parse command
fn handle_parse_command(matches: &ArgMatches) {
    let config = load_config(matches);
    let format = match matches.get_one::<String>("format") {
        Some(name) => name.parse::<OutputFormat>().unwrap_or_else(|e| fail(e)),
        None => config.inspect.format,
    };

    let source = read_source(matches);
    let result = tokenize(&source);
    if !result.success {
        log::warn!("lexer stopped early, {} bytes left", result.remainder.len());
    }
    let nodes = parse(&result.tokens, config.syntax);
    let output = serialize_nodes(&nodes, format, config.inspect.truncate)
        .unwrap_or_else(|e| fail(e));
    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }
}

/// Handle the tokens command
fn handle_tokens_command(matches: &ArgMatches) {
    let source = read_source(matches);
    let result = tokenize(&source);
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("simple");
    let output = match format {
        "simple" => format_tokens(&result.tokens),
        "json" => tokens_to_json(&result.tokens).unwrap_or_else(|e| fail(e)),
        other => fail(format!("unknown token format '{}'", other)),
    };
    print!("{}", output);
    if !output.is_empty() && !output.ends_with('\n') {
        println!();
    }
}
