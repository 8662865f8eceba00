// src/exec/runner.rs

//! Concurrent command runner.
//!
//! Every trigger launches one subprocess. Subprocesses are tracked so the
//! runner can wait for all of them on shutdown, optionally capped by a
//! concurrency limit, and optionally bounded by a per-command timeout.

use std::num::NonZeroUsize;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use tokio::process::{Child, Command};
use tokio::sync::{Semaphore, mpsc};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, error, info, warn};

use crate::errors::{Error, Result};
use crate::exec::command::{CommandLine, render};
use crate::types::Trigger;

/// Optional knobs for [`CommandRunner`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunnerOptions {
    /// Kill a command that runs longer than this.
    pub timeout: Option<Duration>,
    /// Maximum number of commands running at the same time.
    pub max_concurrent: Option<NonZeroUsize>,
}

impl RunnerOptions {
    /// Set the per-command timeout. A zero duration means no timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = (!timeout.is_zero()).then_some(timeout);
        self
    }

    pub fn with_max_concurrent(mut self, limit: NonZeroUsize) -> Self {
        self.max_concurrent = Some(limit);
        self
    }
}

/// Runs the command template once per trigger.
#[derive(Debug)]
pub struct CommandRunner {
    template: String,
    options: RunnerOptions,
    cancel: CancellationToken,
    slots: Option<Arc<Semaphore>>,
    tracker: TaskTracker,
}

impl CommandRunner {
    /// Create a runner for `template`.
    ///
    /// All spawned commands are killed once `cancel` fires.
    pub fn new(template: impl Into<String>, cancel: CancellationToken, options: RunnerOptions) -> Self {
        Self {
            template: template.into(),
            options,
            cancel,
            slots: options
                .max_concurrent
                .map(|limit| Arc::new(Semaphore::new(limit.get()))),
            tracker: TaskTracker::new(),
        }
    }

    /// Number of launched commands that have not finished yet.
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// Launch the command for one trigger without waiting for it to finish.
    ///
    /// When the concurrency limit is reached this waits for a free slot
    /// first. Failures of the command itself are logged, never returned.
    pub async fn run(&self, path: &str, events: &[String]) -> Result<()> {
        let rendered = render(&self.template, path, events);
        let Some(line) = CommandLine::parse(&rendered) else {
            debug!(template = %self.template, "command is empty; nothing to run");
            return Ok(());
        };

        let permit = match &self.slots {
            Some(slots) => {
                if slots.available_permits() == 0 {
                    debug!(cmd = %line, "concurrency limit reached; waiting for a free slot");
                }
                tokio::select! {
                    res = Arc::clone(slots).acquire_owned() => Some(res.map_err(Error::from)?),
                    _ = self.cancel.cancelled() => {
                        debug!(cmd = %line, "cancelled while waiting for a free slot");
                        return Ok(());
                    }
                }
            }
            None => None,
        };

        if self.cancel.is_cancelled() {
            debug!(cmd = %line, "runner cancelled; not launching");
            return Ok(());
        }

        let timeout = self.options.timeout;
        let cancel = self.cancel.clone();
        self.tracker.spawn(async move {
            // Hold the slot until the process is gone.
            let _permit = permit;
            if let Err(err) = execute(&line, timeout, &cancel).await {
                let err = format!("{err:#}");
                error!(program = %line.program, error = %err, "error executing command");
            }
        });

        Ok(())
    }

    /// Read triggers from `triggers` and run each one until cancellation or
    /// until the channel closes, then wait for every launched command.
    pub async fn start(&self, mut triggers: mpsc::Receiver<Trigger>) -> Result<()> {
        info!(template = %self.template, "command runner started");

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    info!("command runner cancelled");
                    break;
                }
                maybe_trigger = triggers.recv() => match maybe_trigger {
                    Some(trigger) => self.run(&trigger.path, &trigger.events).await?,
                    None => {
                        info!("trigger channel closed");
                        break;
                    }
                }
            }
        }

        self.wait().await;
        Ok(())
    }

    /// Wait for all commands launched so far to exit.
    pub async fn wait(&self) {
        let pending = self.tracker.len();
        if pending > 0 {
            info!(pending, "waiting for running commands to finish");
        }
        self.tracker.close();
        self.tracker.wait().await;
        self.tracker.reopen();
    }
}

async fn execute(line: &CommandLine, timeout: Option<Duration>, cancel: &CancellationToken) -> anyhow::Result<()> {
    info!(cmd = %line, "starting command");

    let deadline = timeout.map(|t| Instant::now() + t);
    let mut child = Command::new(&line.program)
        .args(&line.args)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true)
        .spawn()
        .with_context(|| format!("spawning process {:?}", line.program))?;

    let expired = async {
        match deadline {
            Some(deadline) => tokio::time::sleep_until(deadline).await,
            None => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        status_res = child.wait() => {
            let status = status_res
                .with_context(|| format!("waiting for process {:?}", line.program))?;
            if !status.success() {
                bail!("command error: {status}");
            }
            debug!(cmd = %line, "command finished");
        }
        _ = expired => {
            warn!(cmd = %line, ?timeout, "command timed out; killing process");
            kill(&mut child, line).await;
            bail!("command timed out after {:?}", timeout.unwrap_or_default());
        }
        _ = cancel.cancelled() => {
            info!(cmd = %line, "cancellation requested; killing process");
            kill(&mut child, line).await;
        }
    }

    Ok(())
}

async fn kill(child: &mut Child, line: &CommandLine) {
    if let Err(e) = child.kill().await {
        warn!(cmd = %line, error = %e, "failed to kill child process");
    }
}
