//! Command-line interface for combinate
//! This binary runs the bundled example grammars and single patterns, mostly as a way to poke at
//! the engine from a shell.
//!
//! Usage:
//!   combinate calc `<expression>` [--format `<format>`] [--config `<file>`]  - Parse and evaluate a calculator expression
//!   combinate match `<pattern>` `<input>` [--position `<n>`] [--ignore-case]  - Run one anchored pattern
//!   combinate -v ...                                                       - Log at DEBUG (-vv for TRACE) to stderr

use std::process;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use combinate::driver::parse_at;
use combinate::grammars::calc::{self, Calculator, Expr};
use combinate::settings::{Loader, OutputFormat, Settings};
use combinate::{pattern, pattern_case_insensitive};
use config::ConfigError;
use tracing::Level;

fn main() {
    let matches = Command::new("combinate")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for running grammars built with the combinate parser combinators")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::Count)
                .help("Log parser activity to stderr (repeat for more detail)"),
        )
        .subcommand(
            Command::new("calc")
                .about("Parse and evaluate an expression of integers, '+', '-' and parentheses")
                .arg(
                    Arg::new("expression")
                        .help("The expression to evaluate, e.g. '1+2-(3+1)'")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format: the value, or the parse tree as json or yaml")
                        .value_parser(["value", "json", "yaml"]),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .help("A TOML file layered over the built-in defaults"),
                ),
        )
        .subcommand(
            Command::new("match")
                .about("Run a single pattern anchored at a position and print the parse result")
                .arg(
                    Arg::new("pattern")
                        .help("Regular expression to anchor at the position")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("input")
                        .help("Text to match against")
                        .required(true)
                        .index(2),
                )
                .arg(
                    Arg::new("position")
                        .long("position")
                        .short('p')
                        .help("Byte offset to start matching at")
                        .value_parser(value_parser!(usize))
                        .default_value("0"),
                )
                .arg(
                    Arg::new("ignore-case")
                        .long("ignore-case")
                        .short('i')
                        .help("Match without regard to case")
                        .action(ArgAction::SetTrue),
                ),
        )
        .get_matches();

    init_tracing(matches.get_count("verbose"));

    // Handle subcommands
    match matches.subcommand() {
        Some(("calc", calc_matches)) => {
            let expression = calc_matches.get_one::<String>("expression").unwrap();
            handle_calc_command(expression, calc_matches);
        }
        Some(("match", match_matches)) => {
            let pattern = match_matches.get_one::<String>("pattern").unwrap();
            let input = match_matches.get_one::<String>("input").unwrap();
            let position = *match_matches.get_one::<usize>("position").unwrap();
            let ignore_case = match_matches.get_flag("ignore-case");
            handle_match_command(pattern, input, position, ignore_case);
        }
        _ => unreachable!(),
    }
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// Handle the calc command
fn handle_calc_command(expression: &str, matches: &ArgMatches) {
    let settings = load_settings(matches).unwrap_or_else(|e| {
        eprintln!("Error loading configuration: {}", e);
        process::exit(1);
    });

    let calculator = Calculator::new(settings.calc, settings.driver).unwrap_or_else(|e| {
        eprintln!("Grammar error: {}", e);
        process::exit(1);
    });

    let expr = calculator.parse(expression).unwrap_or_else(|e| {
        eprintln!("Parse error: {}", e);
        process::exit(1);
    });

    let output = render(&expr, settings.output.format).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    println!("{}", output.trim_end());
}

fn load_settings(matches: &ArgMatches) -> Result<Settings, ConfigError> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set_override("output.format", format.as_str())?;
    }
    loader.build()
}

fn render(expr: &Expr, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Value => calc::evaluate(expr)
            .map(|value| value.to_string())
            .map_err(|e| e.to_string()),
        OutputFormat::Json => serde_json::to_string(expr).map_err(|e| e.to_string()),
        OutputFormat::Yaml => serde_yaml::to_string(expr).map_err(|e| e.to_string()),
    }
}

/// Handle the match command
fn handle_match_command(expr: &str, input: &str, position: usize, ignore_case: bool) {
    let compiled = if ignore_case {
        pattern_case_insensitive(expr)
    } else {
        pattern(expr)
    };
    let parser = compiled.unwrap_or_else(|e| {
        eprintln!("Grammar error: {}", e);
        process::exit(1);
    });

    let result = parse_at(&parser, input, position).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    match serde_json::to_string(&result) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
