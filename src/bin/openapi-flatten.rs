//! OpenAPI flatten CLI
//!
//! Command-line interface for flattening discriminated unions in an OpenAPI document.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use openapi_flatten::{run, CollisionPolicy, FlattenConfig, DEFAULT_INPUT, DEFAULT_OUTPUT};
use tracing::Level;

#[derive(Parser)]
#[command(name = "openapi-flatten")]
#[command(about = "Flatten oneOf/allOf discriminated unions for API documentation viewers")]
#[command(version)]
struct Cli {
    /// OpenAPI document to read
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Where to write the flattened document (parent directories are created)
    #[arg(default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// What to do when a generated schema name is taken: error, rename, or overwrite
    #[arg(long, default_value = "error")]
    on_collision: String,

    /// Print the transformation report as JSON instead of a summary line
    #[arg(long)]
    json: bool,

    /// Only log warnings and errors
    #[arg(long, short, conflicts_with = "verbose")]
    quiet: bool,

    /// Log every variant decision
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.quiet, cli.verbose);

    match run_flatten(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn init_logging(quiet: bool, verbose: bool) {
    let level = if quiet {
        Level::WARN
    } else if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .init();
}

fn run_flatten(cli: Cli) -> Result<(), u8> {
    let Some(policy) = CollisionPolicy::parse(&cli.on_collision) else {
        eprintln!(
            "Error: unknown collision policy \"{}\": expected error, rename, or overwrite",
            cli.on_collision
        );
        return Err(2);
    };

    let config = FlattenConfig::default()
        .with_input(cli.input)
        .with_output(cli.output)
        .with_collision_policy(policy);

    let report = run(&config).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    if cli.json {
        let rendered = serde_json::to_string_pretty(&report).map_err(|e| {
            eprintln!("Error serializing report: {}", e);
            2u8
        })?;
        println!("{}", rendered);
    } else {
        println!("Done! Added {} flattened variant schemas.", report.added);
    }

    Ok(())
}
