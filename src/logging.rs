// src/logging.rs

//! Logging for `fswatch`.
//!
//! Logs go to stderr so a command's stdout reaches ours untouched. The
//! filter comes from the first of:
//! 1. `--log-level`
//! 2. `FSWATCH_LOG`, read as `EnvFilter` directives (`debug`,
//!    `fswatch::exec=trace,info`, ...)
//! 3. `info`

use anyhow::Result;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

pub const LOG_ENV: &str = "FSWATCH_LOG";

/// Install the global subscriber. Fails if one is already set.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env = std::env::var(LOG_ENV).ok();

    fmt()
        .with_env_filter(log_filter(cli_level, env.as_deref()))
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    Ok(())
}

/// Build the filter from the CLI level and the raw `FSWATCH_LOG` value.
///
/// Unparseable directives fall back to `info`.
pub fn log_filter(cli_level: Option<LogLevel>, env: Option<&str>) -> EnvFilter {
    if let Some(level) = cli_level {
        return EnvFilter::default().add_directive(level_filter(level).into());
    }

    env.map(str::trim)
        .filter(|directives| !directives.is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::default().add_directive(LevelFilter::INFO.into()))
}

fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Trace => LevelFilter::TRACE,
    }
}
