//! rfetch CLI - fetch a URL and write the body out
//!
//! Usage:
//!   rfetch -u <url>                    Print the body to stdout
//!   rfetch -u <url> -o <file>          Write the body to a file
//!   rfetch -u <url> -t 10 -r 5         10s timeout, up to 5 attempts
//!   rfetch -u <url> -f 3               Repeat the whole fetch 3 times

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, CommandFactory, FromArgMatches, Parser};
use rfetch::config::{DEFAULT_REPEAT, DEFAULT_RETRY_COUNT, DEFAULT_TIMEOUT_SECS};
use rfetch::{output, FetchConfig, FetchError};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "rfetch")]
#[command(about = "Fetch a URL over HTTP and write the body to a file or stdout")]
#[command(version, disable_version_flag = true)]
struct Cli {
    /// URL to fetch (required)
    #[arg(short, long)]
    url: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Timeout in seconds for each attempt (0 = none)
    #[arg(short, long, env = "RFETCH_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Retry count (total attempts, at least one)
    #[arg(short, long, env = "RFETCH_RETRY", default_value_t = DEFAULT_RETRY_COUNT)]
    retry: u32,

    /// Number of times to fetch
    #[arg(
        short = 'f',
        long = "for",
        default_value_t = DEFAULT_REPEAT,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    repeat: u32,

    /// Suppress progress and retry warnings
    #[arg(short, long)]
    quiet: bool,
}

/// Command definition with `-v` as the version short flag
fn command() -> clap::Command {
    Cli::command().arg(
        Arg::new("version")
            .short('v')
            .long("version")
            .action(ArgAction::Version)
            .help("Show version information"),
    )
}

fn main() -> ExitCode {
    let cli = match command()
        .try_get_matches()
        .and_then(|matches| Cli::from_arg_matches(&matches))
    {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too and go to stdout
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            if e.downcast_ref::<FetchError>().is_some_and(FetchError::is_usage) {
                eprintln!("\n{}", command().render_help());
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = FetchConfig::new(cli.url.as_deref().unwrap_or_default())?
        .with_timeout(cli.timeout)
        .with_retry(cli.retry)
        .with_output(cli.output)
        .with_repeat(cli.repeat)
        .with_quiet(cli.quiet);

    if config.repeat() == 1 {
        rfetch::run(&config)?;
        return Ok(());
    }

    for i in 1..=config.repeat() {
        if !config.is_quiet() {
            output::detail(&format!("run {}/{}: GET {}", i, config.repeat(), config.url()));
        }
        rfetch::run(&config)
            .with_context(|| format!("run {}/{} failed", i, config.repeat()))?;
    }

    Ok(())
}
