//! Command-line interface for trigex
//! This binary validates trigger expressions and prints what they reference.
//!
//! Usage:
//!   trigex check `<expression>` [--format `<format>`]  - Parse one expression and print the result
//!   trigex hosts `<expression>`                      - Print the unique hosts of an expression
//!   trigex batch `<path>`                            - Validate one expression per line
//!   trigex list-formats                            - List all available output formats
//!
//! Exit status is 1 when an expression is invalid and 2 on usage, config or IO errors.

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::io::{self, Read};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use trigex::trigger::config::{Loader, TrigexConfig};
use trigex::trigger::error::Result;
use trigex::trigger::formats::DEFAULT_REGISTRY;
use trigex::ExpressionParser;

fn cli() -> Command {
    Command::new("trigex")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for validating monitoring trigger expressions")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults (default: ./trigex.toml)")
                .global(true),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (json, yaml, text)")
                .global(true),
        )
        .arg(
            Arg::new("no-lld")
                .long("no-lld")
                .help("Reject {#MACRO} low-level discovery macros")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log parser activity to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("check")
                .about("Parse one expression and print the result")
                .arg(
                    Arg::new("expression")
                        .help("Trigger expression to parse")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("hosts")
                .about("Print the unique hosts an expression references")
                .arg(
                    Arg::new("expression")
                        .help("Trigger expression to parse")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("batch")
                .about("Validate one expression per line")
                .arg(
                    Arg::new("path")
                        .help("File with one expression per line, or - for stdin")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"))
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    match run(&matches) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "trigex=debug" } else { "trigex=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(matches: &ArgMatches) -> Result<ExitCode> {
    let config = load_config(matches)?;
    tracing::debug!(?config, "configuration loaded");

    match matches.subcommand() {
        Some(("check", sub)) => {
            let expression = sub.get_one::<String>("expression").unwrap();
            handle_check_command(&config, expression)
        }
        Some(("hosts", sub)) => {
            let expression = sub.get_one::<String>("expression").unwrap();
            Ok(handle_hosts_command(&config, expression))
        }
        Some(("batch", sub)) => {
            let path = sub.get_one::<String>("path").unwrap();
            handle_batch_command(&config, path)
        }
        Some(("list-formats", _)) => {
            handle_list_formats_command();
            Ok(ExitCode::SUCCESS)
        }
        _ => unreachable!(),
    }
}

fn load_config(matches: &ArgMatches) -> Result<TrigexConfig> {
    let mut loader = match matches.get_one::<String>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file("trigex.toml"),
    }
    .with_env();

    if matches.get_flag("no-lld") {
        loader = loader.set_override("parser.allow_lld_macros", false)?;
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set_override("output.format", format.clone())?;
    }

    Ok(loader.build()?)
}

fn exit_status(valid: bool) -> ExitCode {
    if valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

/// Handle the check command
fn handle_check_command(config: &TrigexConfig, expression: &str) -> Result<ExitCode> {
    let mut parser = ExpressionParser::new(config.parser_options());
    let result = parser.parse(expression);
    let output = DEFAULT_REGISTRY.serialize(result, &config.output.format)?;
    print!("{}", output);
    Ok(exit_status(result.is_valid))
}

/// Handle the hosts command
fn handle_hosts_command(config: &TrigexConfig, expression: &str) -> ExitCode {
    let mut parser = ExpressionParser::new(config.parser_options());
    let valid = parser.parse(expression).is_valid;
    if !valid {
        if let Some(result) = parser.last_result() {
            eprintln!("{}", result.error);
        }
    }
    for host in parser.hosts() {
        println!("{}", host);
    }
    exit_status(valid)
}

/// Handle the batch command
fn handle_batch_command(config: &TrigexConfig, path: &str) -> Result<ExitCode> {
    let source = if path == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(path)?
    };

    let mut parser = ExpressionParser::new(config.parser_options());
    tracing::debug!(
        path,
        allow_lld_macros = parser.options().allow_lld_macros,
        builtin_macros = ?parser.options().builtin_macros,
        "validating batch"
    );
    let mut all_valid = true;
    for (index, line) in source.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let result = parser.parse(line);
        if result.is_valid {
            println!("{}: ok", index + 1);
        } else {
            all_valid = false;
            println!("{}: {}", index + 1, result.error);
        }
    }
    Ok(exit_status(all_valid))
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available output formats:\n");
    for name in DEFAULT_REGISTRY.list_formats() {
        if let Some(formatter) = DEFAULT_REGISTRY.get(&name) {
            println!("  {}", name);
            println!("    {}", formatter.description());
            println!();
        }
    }
}
