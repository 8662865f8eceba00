// src/config/settings.rs

use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::cli::CliArgs;
use crate::config::model::ConfigFile;
use crate::errors::{FswatchError, Result};
use crate::exec::RunnerOptions;
use crate::types::DispatchMode;
use crate::watch::OpFilter;

/// Command template used when neither the CLI nor the config file set one.
pub const DEFAULT_COMMAND: &str = "echo {Path} {Events}";

/// Everything the pipeline needs, after merging CLI flags over the config
/// file over built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub path: PathBuf,
    pub events: Vec<String>,
    pub command: String,
    pub runner: RunnerOptions,
    pub dispatch: DispatchMode,
}

impl Settings {
    pub fn resolve(args: &CliArgs, file: Option<ConfigFile>) -> Result<Self> {
        let file = file.unwrap_or_default();

        let path = args
            .path
            .as_ref()
            .map(PathBuf::from)
            .or(file.path)
            .ok_or_else(|| FswatchError::ConfigError("path not specified".to_string()))?;

        let events = if args.events.is_empty() {
            file.events
        } else {
            args.events.clone()
        };
        OpFilter::new(&events)?;

        let mut runner = RunnerOptions::default();
        if let Some(timeout) = args.timeout.or(file.timeout) {
            runner = runner.with_timeout(timeout);
        }
        let max_concurrent = match args.max_concurrent {
            Some(n) => Some(NonZeroUsize::new(n).ok_or_else(|| {
                FswatchError::ConfigError("--max-concurrent must be >= 1 (got 0)".to_string())
            })?),
            None => file.max_concurrent,
        };
        if let Some(limit) = max_concurrent {
            runner = runner.with_max_concurrent(limit);
        }

        Ok(Self {
            path,
            events,
            command: args
                .command
                .clone()
                .or(file.command)
                .unwrap_or_else(|| DEFAULT_COMMAND.to_string()),
            runner,
            dispatch: args.dispatch.or(file.dispatch).unwrap_or_default(),
        })
    }
}
