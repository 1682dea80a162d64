//! Command-line interface for depset
//! This binary parses dependency specification expressions and prints the
//! resulting restriction tree.
//!
//! Usage:
//!   depset parse `<expression>` [--no-or] [--compact]  - Parse and print the tree as JSON
//!   depset check `<expression>` [--no-or]              - Validate only

use clap::{Arg, ArgAction, Command};
use depset::depset::parsing::parse;

fn main() {
    let matches = Command::new("depset")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for parsing dependency specification expressions")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("parse")
                .about("Parse an expression and print the restriction tree as JSON")
                .arg(
                    Arg::new("expression")
                        .help("The depset expression to parse")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("no-or")
                        .long("no-or")
                        .action(ArgAction::SetTrue)
                        .help("Reject || groups (for dialects without or-semantics)"),
                )
                .arg(
                    Arg::new("compact")
                        .long("compact")
                        .short('c')
                        .action(ArgAction::SetTrue)
                        .help("Print compact instead of pretty JSON"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Validate an expression without printing the tree")
                .arg(
                    Arg::new("expression")
                        .help("The depset expression to check")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("no-or")
                        .long("no-or")
                        .action(ArgAction::SetTrue)
                        .help("Reject || groups"),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("parse", parse_matches)) => {
            let expression = parse_matches.get_one::<String>("expression").unwrap();
            let enable_or = !parse_matches.get_flag("no-or");
            let compact = parse_matches.get_flag("compact");
            handle_parse_command(expression, enable_or, compact);
        }
        Some(("check", check_matches)) => {
            let expression = check_matches.get_one::<String>("expression").unwrap();
            let enable_or = !check_matches.get_flag("no-or");
            handle_check_command(expression, enable_or);
        }
        _ => unreachable!(),
    }
}

/// Handle the parse command
fn handle_parse_command(expression: &str, enable_or: bool, compact: bool) {
    let depset = parse(expression, enable_or).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let json = if compact {
        serde_json::to_string(&depset.restrictions)
    } else {
        serde_json::to_string_pretty(&depset.restrictions)
    }
    .unwrap_or_else(|e| {
        eprintln!("Serialization error: {}", e);
        std::process::exit(1);
    });

    println!("{}", json);
    if depset.has_conditionals {
        eprintln!("note: expression contains use conditionals");
    }
}

/// Handle the check command
fn handle_check_command(expression: &str, enable_or: bool) {
    match parse(expression, enable_or) {
        Ok(depset) => {
            println!(
                "ok: {} top-level restriction(s){}",
                depset.restrictions.len(),
                if depset.has_conditionals {
                    ", has conditionals"
                } else {
                    ""
                }
            );
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
