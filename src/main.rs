//! Command-line interface for the scrapeconf binary.
//!
//! The CLI loads a scrape configuration, reports validation failures with a
//! non-zero exit status and prints the normalized document as JSON.

use std::{
    io,
    path::{Path, PathBuf},
    process,
};

use clap::{ArgAction, Args, Parser, Subcommand};
use scrapeconf::{
    Error, LoadOptions, SUPPORTED_SERVICES, ScrapeConfig, ValidationMode, load_config_with,
};
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log filter.
const LOG_ENV: &str = "SCRAPECONF_LOG";

/// Command line interface for validating scrape configurations.
#[derive(Debug, Parser,)]
#[command(name = "scrapeconf", version, about = "Validate metrics scrape configurations")]
struct Cli
{
    #[command(subcommand)]
    command: Option<Command,>,

    /// Legacy argument support for the default check command.
    #[command(flatten)]
    legacy: LegacyCheckArgs,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Debug, Subcommand,)]
/// Supported commands exposed by the CLI.
enum Command
{
    /// Load and validate a configuration file, printing it as JSON.
    Check(CheckArgs,),
    /// Print the service types accepted by discovery jobs.
    Services,
}

#[derive(Debug, Args,)]
/// Arguments accepted by the `check` subcommand.
struct CheckArgs
{
    /// Path to the YAML scrape configuration.
    #[arg(long = "config", value_name = "PATH", env = "SCRAPECONF_CONFIG")]
    config: PathBuf,

    /// Output formatted JSON for easier inspection.
    #[arg(long = "pretty", action = ArgAction::SetTrue)]
    pretty: bool,

    /// Report every violation instead of stopping at the first one.
    #[arg(long = "collect", action = ArgAction::SetTrue)]
    collect: bool,
}

/// Arguments accepted when the CLI is invoked without a subcommand.
#[derive(Debug, Args, Default,)]
struct LegacyCheckArgs
{
    /// Path to the YAML scrape configuration.
    #[arg(long = "config", value_name = "PATH")]
    config: Option<PathBuf,>,

    /// Output formatted JSON for easier inspection.
    #[arg(long = "pretty", action = ArgAction::SetTrue)]
    pretty: bool,
}

/// Entry point that reports errors and sets the appropriate exit status.
fn main()
{
    if let Err(error,) = run() {
        eprintln!("{}", error.to_display_string());
        process::exit(1,);
    }
}

/// Executes the CLI using parsed arguments.
///
/// # Errors
///
/// Propagates errors originating from configuration loading and validation.
fn run() -> Result<(), Error,>
{
    let cli = Cli::parse();
    init_logging(cli.verbose,);

    match cli.command {
        Some(Command::Check(args,),) => {
            let mode = if args.collect { ValidationMode::Collect } else { ValidationMode::FailFast };
            run_check(&args.config, args.pretty, mode,)
        }
        Some(Command::Services,) => run_services(),
        None => run_legacy_check(&cli.legacy,),
    }
}

fn verbosity_directive(verbosity: u8,) -> &'static str
{
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_logging(verbosity: u8,)
{
    let filter = EnvFilter::try_from_env(LOG_ENV,)
        .unwrap_or_else(|_| EnvFilter::new(verbosity_directive(verbosity,),),);

    let _ = tracing_subscriber::fmt().with_env_filter(filter,).with_writer(io::stderr,).try_init();
}

fn run_check(path: &Path, pretty: bool, mode: ValidationMode,) -> Result<(), Error,>
{
    let loaded = load_config_with(path, LoadOptions {
        mode,
    },)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    write_config(&mut handle, &loaded.config, pretty,)
}

fn write_config<W: io::Write,>(writer: &mut W, config: &ScrapeConfig, pretty: bool,) -> Result<(), Error,>
{
    if pretty {
        serde_json::to_writer_pretty(writer, config,)?;
    } else {
        serde_json::to_writer(writer, config,)?;
    }

    Ok((),)
}

fn run_services() -> Result<(), Error,>
{
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer(&mut handle, SUPPORTED_SERVICES,)?;

    Ok((),)
}

fn run_legacy_check(args: &LegacyCheckArgs,) -> Result<(), Error,>
{
    let config = args
        .config
        .as_deref()
        .ok_or_else(|| Error::validation("missing required --config <PATH> argument",),)?;

    run_check(config, args.pretty, ValidationMode::FailFast,)
}
