// src/cli.rs

//! CLI argument parsing using `clap`.

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::parse_duration;
use crate::types::DispatchMode;

const AFTER_HELP: &str = "\
The event list is a comma separated list of events to watch for.
Supported events are:
  - chmod
  - create
  - remove
  - rename
  - write

The path where the change was detected and the corresponding events can
be passed to the command using {Path} and {Events} placeholders, which will
be substituted with the path and the comma-separated list of events:

$ fswatch --command 'echo {Path} {Events}' ./";

/// Command-line arguments for `fswatch`.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "fswatch",
    version,
    about = "Watch a path for changes and run a command for every change.",
    long_about = None,
    after_help = AFTER_HELP
)]
pub struct CliArgs {
    /// Path to watch.
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Comma-separated list of events to watch.
    ///
    /// If omitted, every event triggers the command.
    #[arg(short, long, value_name = "EVENTS", value_delimiter = ',')]
    pub events: Vec<String>,

    /// Command template.
    ///
    /// Default: `echo {Path} {Events}`.
    #[arg(short, long, value_name = "TEMPLATE")]
    pub command: Option<String>,

    /// Kill commands that run longer than this (e.g. `500ms`, `30s`, `2m`).
    #[arg(long, value_name = "DURATION", value_parser = parse_timeout)]
    pub timeout: Option<Duration>,

    /// Maximum number of commands running at the same time.
    #[arg(short = 'j', long, value_name = "N")]
    pub max_concurrent: Option<usize>,

    /// How triggers are handed to the runner (channel, direct).
    #[arg(long, value_name = "MODE")]
    pub dispatch: Option<DispatchMode>,

    /// Optional TOML config file; flags override its values.
    #[arg(long, value_name = "FILE")]
    pub config: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `FSWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

fn parse_timeout(s: &str) -> Result<Duration, String> {
    parse_duration(s).map_err(|e| e.to_string())
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
