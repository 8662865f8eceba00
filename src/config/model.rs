// src/config/model.rs

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::types::DispatchMode;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [watch]
/// path = "./"
/// events = ["create", "write"]
///
/// [runner]
/// command = "echo {Path} {Events}"
/// timeout = "30s"
/// max_concurrent = 4
/// dispatch = "channel"
/// ```
///
/// Every section and key is optional; CLI flags override whatever is set
/// here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub watch: WatchSection,

    #[serde(default)]
    pub runner: RunnerSection,
}

/// `[watch]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchSection {
    /// Path to watch.
    #[serde(default)]
    pub path: Option<String>,

    /// Operation kinds to react to. Empty means all of them.
    #[serde(default)]
    pub events: Vec<String>,
}

/// `[runner]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunnerSection {
    /// Command template with `{Path}` / `{Events}` placeholders.
    #[serde(default)]
    pub command: Option<String>,

    /// Duration string such as `"500ms"` or `"30s"`. `"0s"` disables the
    /// timeout.
    #[serde(default)]
    pub timeout: Option<String>,

    /// Maximum number of commands running at once.
    #[serde(default)]
    pub max_concurrent: Option<usize>,

    #[serde(default)]
    pub dispatch: Option<DispatchMode>,
}

/// Validated configuration file.
///
/// Only constructed through `TryFrom<RawConfigFile>`, so event names are
/// known to be valid and durations are already parsed.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub path: Option<PathBuf>,
    pub events: Vec<String>,
    pub command: Option<String>,
    pub timeout: Option<Duration>,
    pub max_concurrent: Option<NonZeroUsize>,
    pub dispatch: Option<DispatchMode>,
}
