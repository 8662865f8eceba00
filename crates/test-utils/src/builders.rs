#![allow(dead_code)]

use std::path::Path;

use fswatch::config::{ConfigFile, RawConfigFile};
use fswatch::types::DispatchMode;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn path(mut self, path: &str) -> Self {
        self.config.watch.path = Some(path.to_string());
        self
    }

    pub fn event(mut self, name: &str) -> Self {
        self.config.watch.events.push(name.to_string());
        self
    }

    pub fn command(mut self, template: &str) -> Self {
        self.config.runner.command = Some(template.to_string());
        self
    }

    pub fn timeout(mut self, duration: &str) -> Self {
        self.config.runner.timeout = Some(duration.to_string());
        self
    }

    pub fn max_concurrent(mut self, n: usize) -> Self {
        self.config.runner.max_concurrent = Some(n);
        self
    }

    pub fn dispatch(mut self, mode: DispatchMode) -> Self {
        self.config.runner.dispatch = Some(mode);
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Write a shell script into `dir` and return a command template prefix
/// that runs it, e.g. `sh /tmp/x/record.sh`.
///
/// The script sees the rendered arguments as `$1`, `$2`, ... Running it
/// through `sh` avoids exec-ing a file that was just written.
pub fn script_command(dir: &Path, name: &str, body: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("writing test script");
    format!("sh {}", path.display())
}

/// Path of a file inside `dir` as a `String`, for use in script bodies.
pub fn file_in(dir: &Path, name: &str) -> String {
    dir.join(name).display().to_string()
}
