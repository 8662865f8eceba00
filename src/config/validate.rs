// src/config/validate.rs

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{FswatchError, Result};
use crate::watch::OpFilter;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = FswatchError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        // Fails on the first unknown event name.
        OpFilter::new(&raw.watch.events)?;

        let timeout = raw
            .runner
            .timeout
            .as_deref()
            .map(parse_duration)
            .transpose()?;

        let max_concurrent = raw
            .runner
            .max_concurrent
            .map(|n| {
                NonZeroUsize::new(n).ok_or_else(|| {
                    FswatchError::ConfigError(
                        "[runner].max_concurrent must be >= 1 (got 0)".to_string(),
                    )
                })
            })
            .transpose()?;

        if let Some(path) = &raw.watch.path {
            if path.trim().is_empty() {
                return Err(FswatchError::ConfigError(
                    "[watch].path must not be empty".to_string(),
                ));
            }
        }

        Ok(ConfigFile {
            path: raw.watch.path.map(PathBuf::from),
            events: raw.watch.events,
            command: raw.runner.command,
            timeout,
            max_concurrent,
            dispatch: raw.runner.dispatch,
        })
    }
}

/// Parse a duration such as `"250ms"`, `"3s"`, `"2m"` or `"1h"`.
pub fn parse_duration(s: &str) -> Result<Duration> {
    let invalid = |reason: String| FswatchError::InvalidDuration(s.to_string(), reason);

    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(invalid("empty duration string".to_string()));
    }

    // Find the boundary between digits and suffix.
    let idx = trimmed
        .chars()
        .position(|c| !c.is_ascii_digit())
        .ok_or_else(|| invalid("duration missing unit suffix".to_string()))?;

    let (num_part, unit_part) = trimmed.split_at(idx);
    let value: u64 = num_part
        .parse()
        .map_err(|e| invalid(format!("invalid duration number '{num_part}': {e}")))?;

    let secs_per_unit = match unit_part.trim().to_lowercase().as_str() {
        "ms" => return Ok(Duration::from_millis(value)),
        "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        unit => {
            return Err(invalid(format!(
                "unsupported duration unit '{unit}'; expected ms, s, m, or h"
            )));
        }
    };

    value
        .checked_mul(secs_per_unit)
        .map(Duration::from_secs)
        .ok_or_else(|| invalid("duration is too large".to_string()))
}
