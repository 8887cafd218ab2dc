//! Command-line interface for ebnf2bnf
//! This binary converts EBNF grammar descriptions into canonical BNF, or dumps their tokens.
//!
//! Usage:
//!   ebnf2bnf convert `<path>...` [--format `<format>`] [--config `<toml>`] [--prefix `<prefix>`] [--write]
//!   ebnf2bnf tokens `<path>...` [--format simple|json] [--write]
//!   ebnf2bnf list-formats
//!
//! Every file is processed independently: a syntax error in one file is reported and the
//! remaining files are still processed. The exit status is 1 if any file failed.

use clap::{Arg, ArgAction, ArgMatches, Command};
use ebnf2bnf::ebnf::config::{ConverterConfig, Loader};
use ebnf2bnf::ebnf::processor::{
    available_formats, output_path, process_file, ProcessingError, ProcessingSpec,
};
use std::path::Path;

/// Picked up from the working directory when present
const LOCAL_CONFIG: &str = "ebnf2bnf.toml";

fn paths_arg() -> Arg {
    Arg::new("paths")
        .help("Grammar description files")
        .required(true)
        .num_args(1..)
        .index(1)
}

fn write_arg() -> Arg {
    Arg::new("write")
        .long("write")
        .short('w')
        .help("Write each result next to its input instead of printing it")
        .action(ArgAction::SetTrue)
}

fn main() {
    let matches = Command::new("ebnf2bnf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Converts EBNF grammar descriptions into canonical BNF")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase log verbosity (repeatable); RUST_LOG overrides it")
                .action(ArgAction::Count)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults")
                .global(true),
        )
        .arg(
            Arg::new("prefix")
                .long("prefix")
                .help("Prefix of synthesized non-terminal names (overrides the config)")
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert grammar files")
                .arg(paths_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (e.g., 'grammar-report', 'grammar-bnf')"),
                )
                .arg(write_arg()),
        )
        .subcommand(
            Command::new("tokens")
                .about("Dump the tokens of grammar files")
                .arg(paths_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Token format: 'simple' or 'json'"),
                )
                .arg(write_arg()),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"))
        .get_matches();

    init_logging(matches.get_count("verbose"));

    let config = load_config(
        matches.get_one::<String>("config"),
        matches.get_one::<String>("prefix"),
    )
    .unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    let succeeded = match matches.subcommand() {
        Some(("convert", convert_matches)) => {
            let format = convert_matches
                .get_one::<String>("format")
                .cloned()
                .unwrap_or_else(|| config.output.format.clone());
            handle_process_command(convert_matches, &format, &config)
        }
        Some(("tokens", tokens_matches)) => {
            let format = tokens_matches
                .get_one::<String>("format")
                .map(|format| format!("token-{}", format))
                .unwrap_or_else(|| config.tokens.format.clone());
            handle_process_command(tokens_matches, &format, &config)
        }
        Some(("list-formats", _)) => {
            handle_list_formats_command();
            true
        }
        _ => unreachable!(),
    };

    if !succeeded {
        std::process::exit(1);
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

/// Defaults, then `./ebnf2bnf.toml`, then `--config`, then `--prefix`
fn load_config(
    path: Option<&String>,
    prefix: Option<&String>,
) -> Result<ConverterConfig, config::ConfigError> {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG);
    if let Some(path) = path {
        loader = loader.with_file(path);
    }
    if let Some(prefix) = prefix {
        loader = loader.with_fresh_prefix(prefix)?;
    }
    loader.build()
}

/// Handle the convert and tokens commands. Returns false if any file failed.
fn handle_process_command(matches: &ArgMatches, format: &str, config: &ConverterConfig) -> bool {
    let spec = ProcessingSpec::from_string(format).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!("Available formats: {}", available_formats().join(", "));
        std::process::exit(1);
    });
    let write = matches.get_flag("write");

    let mut succeeded = true;
    for path in matches.get_many::<String>("paths").into_iter().flatten() {
        let path = Path::new(path);
        let result = process_file(path, &spec, config);
        if let Err(e) = &result {
            eprintln!("Error: {}", e);
            succeeded = false;
        }

        if !write {
            if let Ok(output) = &result {
                print!("{}", output);
            }
            continue;
        }

        // A failed conversion still leaves its diagnostic in the output file
        let contents = match result {
            Ok(output) => output,
            Err(ProcessingError::Syntax { error, .. }) => format!("{}\n", error),
            Err(_) => continue,
        };
        let target = output_path(path, &spec, config);
        if let Err(e) = std::fs::write(&target, contents) {
            eprintln!("Error writing {}: {}", target.display(), e);
            succeeded = false;
        }
    }
    succeeded
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available output formats:\n");
    for format in available_formats() {
        println!("  {}", format);
    }
}
